use clap::{Args, Parser, Subcommand};
use review_core::MatchingMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "study",
    about = "Spaced repetition study sessions over a JSON flashcard deck",
    version
)]
pub struct Cli {
    /// Review database path (overrides STUDY_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Study a deck interactively
    Study(StudyArgs),

    /// Show progress statistics for a deck
    Stats {
        /// Path to deck JSON
        deck: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cards that are due for review
    Due {
        /// Path to deck JSON
        deck: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct StudyArgs {
    /// Path to deck JSON
    pub deck: PathBuf,

    /// Shuffle the session after due-sorting
    #[arg(long)]
    pub shuffle: bool,

    /// Only study cards that are due now
    #[arg(long)]
    pub due_only: bool,

    /// Maximum number of cards in the session
    #[arg(long)]
    pub limit: Option<usize>,

    /// Type answers instead of flipping cards
    #[arg(long)]
    pub typed: bool,

    /// Matching mode for typed answers: exact, case_insensitive, or fuzzy
    #[arg(long)]
    pub matching: Option<MatchingMode>,

    /// Similarity needed to accept a fuzzy typed answer (0-1)
    #[arg(long)]
    pub fuzzy_threshold: Option<f64>,
}

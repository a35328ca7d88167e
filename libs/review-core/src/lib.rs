//! Spaced repetition review scheduling for flashcard study.
//!
//! Provides:
//! - SM-2 review scheduler (pure per-card state transition)
//! - Study session driver over an injected record store and clock
//! - Typed answer matching
//! - Read-side statistics (accuracy, mastery, due counts)

pub mod algorithm;
pub mod clock;
pub mod error;
pub mod matching;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

pub use algorithm::{next_state, ReviewScheduler, Sm2};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, StudyError};
pub use matching::{compare_answers, levenshtein_distance, normalized_similarity, MatchResult};
pub use session::{
    SessionDriver, SessionPhase, SessionSnapshot, SessionSummary, StudySession, SubmitOutcome,
};
pub use stats::{accuracy, due_count, is_due, is_mastered, DeckStats};
pub use store::{MemoryStore, ReviewStore};
pub use types::{
    AnswerLabel, Card, CardId, MatchingMode, Quality, ReviewRecord, SessionOptions,
};

//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first) and can
//! be overridden by command-line flags.

use anyhow::{anyhow, Context};
use review_core::MatchingMode;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "STUDY_DB_PATH";
pub const MATCHING_MODE_VAR: &str = "STUDY_MATCHING_MODE";
pub const FUZZY_THRESHOLD_VAR: &str = "STUDY_FUZZY_THRESHOLD";

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let matching_mode = match lookup(MATCHING_MODE_VAR) {
            Some(value) => value
                .parse::<MatchingMode>()
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("invalid {MATCHING_MODE_VAR}"))?,
            None => MatchingMode::default(),
        };

        let fuzzy_threshold = match lookup(FUZZY_THRESHOLD_VAR) {
            Some(value) => value
                .parse::<f64>()
                .with_context(|| format!("invalid {FUZZY_THRESHOLD_VAR}: {value}"))?,
            None => DEFAULT_FUZZY_THRESHOLD,
        };

        Self {
            db_path,
            matching_mode,
            fuzzy_threshold,
        }
        .validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            anyhow::bail!(
                "fuzzy threshold must be between 0 and 1, got {}",
                self.fuzzy_threshold
            );
        }
        Ok(self)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        matching_mode: Option<MatchingMode>,
        fuzzy_threshold: Option<f64>,
    ) -> anyhow::Result<Self> {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        if let Some(mode) = matching_mode {
            self.matching_mode = mode;
        }
        if let Some(threshold) = fuzzy_threshold {
            self.fuzzy_threshold = threshold;
        }
        self.validated()
    }
}

/// Per-user data directory, falling back to the working directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("study-scheduler")
        .join("reviews.db")
}

//! Subcommand implementations.

pub mod stats;
pub mod study;

use crate::config::Config;
use crate::db::SqliteStore;
use anyhow::Context;
use std::fs;

/// Open the review database, creating its directory if needed.
pub(crate) fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    tracing::debug!(path = %config.db_path.display(), "opening review database");
    SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open review database {}", config.db_path.display()))
}

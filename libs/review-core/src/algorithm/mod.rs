//! Spaced repetition scheduling.

pub mod sm2;

use crate::error::Result;
use crate::types::{Quality, ReviewRecord};
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Trait for review schedulers.
pub trait ReviewScheduler: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Compute the record that follows a review of grade `quality`.
    ///
    /// `prior` is `None` for a card that has never been reviewed.
    fn next_state(
        &self,
        prior: Option<&ReviewRecord>,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> ReviewRecord;
}

/// Schedule with the default SM-2 parameters from a raw 0-5 grade.
pub fn next_state(
    prior: Option<&ReviewRecord>,
    quality: u8,
    now: DateTime<Utc>,
) -> Result<ReviewRecord> {
    let quality = Quality::new(quality)?;
    Ok(Sm2::default().next_state(prior, quality, now))
}

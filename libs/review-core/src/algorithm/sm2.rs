//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with configurable parameters.

use super::ReviewScheduler;
use crate::types::{Quality, ReviewRecord};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful review, and after a lapse.
    pub graduating_interval: u32,
    /// Interval after the second consecutive successful review.
    pub second_interval: u32,
    /// Delay used instead of a full day when the interval is zero.
    pub relearn_delay: Duration,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            graduating_interval: 1,
            second_interval: 6,
            relearn_delay: Duration::minutes(10),
        }
    }
}

impl ReviewScheduler for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn next_state(
        &self,
        prior: Option<&ReviewRecord>,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> ReviewRecord {
        let passed = quality.is_pass();

        let (ease_factor, interval_days, repetitions) = match prior {
            None => self.schedule_first(passed),
            Some(record) => self.schedule_review(record, quality),
        };

        let (total_reviews, correct_count, incorrect_count) = match prior {
            None => (0, 0, 0),
            Some(r) => (r.total_reviews, r.correct_count, r.incorrect_count),
        };

        ReviewRecord {
            ease_factor,
            interval_days,
            repetitions,
            next_review_at: self.next_review_at(now, interval_days),
            last_reviewed_at: now,
            total_reviews: total_reviews + 1,
            correct_count: correct_count + u32::from(passed),
            incorrect_count: incorrect_count + u32::from(!passed),
        }
    }
}

impl Sm2 {
    /// When a card with `interval_days` should come back.
    ///
    /// Saturates at the latest representable instant.
    pub fn next_review_at(&self, now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
        let delay = match interval_days {
            0 => self.relearn_delay,
            days => Duration::days(i64::from(days)),
        };
        now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Ease after a review, floored at `minimum_ease`.
    pub fn adjust_ease(&self, ease_factor: f64, quality: Quality) -> f64 {
        let miss = f64::from(Quality::MAX - quality.value());
        let delta = 0.1 - miss * (0.08 + miss * 0.02);
        (ease_factor + delta).max(self.minimum_ease)
    }

    fn schedule_first(&self, passed: bool) -> (f64, u32, u32) {
        if passed {
            (self.initial_ease, self.graduating_interval, 1)
        } else {
            // Retry within the same sitting
            (self.initial_ease, 0, 0)
        }
    }

    fn schedule_review(&self, record: &ReviewRecord, quality: Quality) -> (f64, u32, u32) {
        let ease = self.adjust_ease(record.ease_factor, quality);

        if !quality.is_pass() {
            return (ease, self.graduating_interval, 0);
        }

        let repetitions = record.repetitions + 1;
        let interval = match repetitions {
            1 => self.graduating_interval,
            2 => self.second_interval,
            // `as` saturates at u32::MAX
            _ => (f64::from(record.interval_days) * ease).round() as u32,
        };
        (ease, interval, repetitions)
    }
}

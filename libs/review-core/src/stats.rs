//! Read-side statistics over review records.

use crate::types::{Card, CardId, ReviewRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Repetitions a card needs before it can count as mastered.
pub const MASTERED_REPETITIONS: u32 = 3;
/// Ease a mastered card must exceed (the starting ease).
pub const MASTERED_EASE: f64 = 2.5;

/// Share of all reviews answered correctly, 0 when nothing was reviewed.
pub fn accuracy<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let (correct, total) = records.into_iter().fold((0u64, 0u64), |(c, t), r| {
        (c + u64::from(r.correct_count), t + u64::from(r.total_reviews))
    });
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

pub fn is_mastered(record: &ReviewRecord) -> bool {
    record.repetitions >= MASTERED_REPETITIONS && record.ease_factor > MASTERED_EASE
}

/// A card is due when it was never reviewed or its review time has come.
pub fn is_due(record: Option<&ReviewRecord>, now: DateTime<Utc>) -> bool {
    record.map_or(true, |r| r.is_due(now))
}

pub fn due_count<'a, I>(records: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = Option<&'a ReviewRecord>>,
{
    records.into_iter().filter(|r| is_due(*r, now)).count()
}

/// Deck statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub due_cards: usize,
    pub mastered_cards: usize,
    pub average_ease: f64,
    pub average_interval: f64,
    pub accuracy: f64,
}

impl DeckStats {
    /// Aggregate over the deck's cards. Records for cards outside the deck are ignored.
    pub fn collect(
        cards: &[Card],
        records: &HashMap<CardId, ReviewRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        let lookups: Vec<Option<&ReviewRecord>> =
            cards.iter().map(|card| records.get(&card.id)).collect();
        let reviewed: Vec<&ReviewRecord> = lookups.iter().flatten().copied().collect();

        let (average_ease, average_interval) = if reviewed.is_empty() {
            (0.0, 0.0)
        } else {
            let n = reviewed.len() as f64;
            (
                reviewed.iter().map(|r| r.ease_factor).sum::<f64>() / n,
                reviewed.iter().map(|r| f64::from(r.interval_days)).sum::<f64>() / n,
            )
        };

        Self {
            total_cards: cards.len(),
            new_cards: cards.len() - reviewed.len(),
            due_cards: due_count(lookups.iter().copied(), now),
            mastered_cards: reviewed.iter().filter(|r| is_mastered(r)).count(),
            average_ease,
            average_interval,
            accuracy: accuracy(reviewed.iter().copied()),
        }
    }
}

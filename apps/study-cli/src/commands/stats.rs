//! Deck statistics and due listings.

use crate::catalog::load_deck;
use crate::config::Config;
use anyhow::Context;
use chrono::{DateTime, Utc};
use review_core::{is_due, Card, CardId, DeckStats, ReviewRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

/// Card listed by the `due` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueCard {
    pub id: CardId,
    pub front: String,
    /// `None` for a card that was never reviewed.
    pub next_review_at: Option<DateTime<Utc>>,
}

pub fn stats(config: &Config, deck: &Path, json: bool) -> anyhow::Result<()> {
    let (cards, records) = load(config, deck)?;
    let stats = DeckStats::collect(&cards, &records, Utc::now());
    write_stats(&mut io::stdout().lock(), &stats, json)
}

pub fn due(config: &Config, deck: &Path, json: bool) -> anyhow::Result<()> {
    let (cards, records) = load(config, deck)?;
    let due = due_cards(&cards, &records, Utc::now());
    write_due(&mut io::stdout().lock(), &due, json)
}

fn load(
    config: &Config,
    deck: &Path,
) -> anyhow::Result<(Vec<Card>, HashMap<CardId, ReviewRecord>)> {
    let cards = load_deck(deck).with_context(|| format!("loading {}", deck.display()))?;
    let records = super::open_store(config)?.all_records()?;
    Ok((cards, records))
}

/// Due cards in study order: never-reviewed first, then most overdue.
pub fn due_cards(
    cards: &[Card],
    records: &HashMap<CardId, ReviewRecord>,
    now: DateTime<Utc>,
) -> Vec<DueCard> {
    let mut due: Vec<DueCard> = cards
        .iter()
        .filter(|card| is_due(records.get(&card.id), now))
        .map(|card| DueCard {
            id: card.id,
            front: card.front.clone(),
            next_review_at: records.get(&card.id).map(|r| r.next_review_at),
        })
        .collect();
    due.sort_by_key(|card| card.next_review_at);
    due
}

pub fn write_stats<W: Write>(out: &mut W, stats: &DeckStats, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
        return Ok(());
    }
    writeln!(out, "Cards:            {}", stats.total_cards)?;
    writeln!(out, "  new:            {}", stats.new_cards)?;
    writeln!(out, "  due:            {}", stats.due_cards)?;
    writeln!(out, "  mastered:       {}", stats.mastered_cards)?;
    writeln!(out, "Average ease:     {:.2}", stats.average_ease)?;
    writeln!(out, "Average interval: {:.1} days", stats.average_interval)?;
    writeln!(out, "Accuracy:         {:.0}%", stats.accuracy * 100.0)?;
    Ok(())
}

pub fn write_due<W: Write>(out: &mut W, due: &[DueCard], json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(due)?)?;
        return Ok(());
    }
    writeln!(out, "{} card(s) due", due.len())?;
    for card in due {
        match card.next_review_at {
            Some(at) => writeln!(out, "  #{:<6} {}  (due {})", card.id, card.front, at.format("%Y-%m-%d %H:%M"))?,
            None => writeln!(out, "  #{:<6} {}  (new)", card.id, card.front)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn record(next_review_at: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            ease_factor: 2.5,
            interval_days: 1,
            repetitions: 1,
            next_review_at,
            last_reviewed_at: next_review_at - Duration::days(1),
            total_reviews: 1,
            correct_count: 1,
            incorrect_count: 0,
        }
    }

    #[test]
    fn due_cards_lists_new_then_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let cards: Vec<Card> = (1..=4).map(|id| Card::new(id, format!("q{id}"), "a")).collect();
        let mut records = HashMap::new();
        records.insert(1, record(now - Duration::hours(1)));
        records.insert(2, record(now + Duration::days(2)));
        records.insert(3, record(now - Duration::days(3)));

        let due = due_cards(&cards, &records, now);
        let ids: Vec<CardId> = due.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 3, 1]);
        assert_eq!(due[0].next_review_at, None);
    }

    #[test]
    fn text_report_mentions_counts() {
        let stats = DeckStats {
            total_cards: 10,
            new_cards: 4,
            due_cards: 6,
            mastered_cards: 2,
            average_ease: 2.45,
            average_interval: 3.5,
            accuracy: 0.8,
        };
        let mut out = Vec::new();
        write_stats(&mut out, &stats, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Cards:            10"));
        assert!(text.contains("Accuracy:         80%"));
    }

    #[test]
    fn json_due_report() {
        let due = vec![DueCard {
            id: 9,
            front: "q".into(),
            next_review_at: None,
        }];
        let mut out = Vec::new();
        write_due(&mut out, &due, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], 9);
        assert!(value[0]["next_review_at"].is_null());
    }
}

//! Review record repository backed by SQLite.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use review_core::{CardId, ReviewRecord, ReviewStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

const SELECT_COLUMNS: &str = "card_id, ease_factor, interval_days, repetitions, next_review_at, last_reviewed_at, total_reviews, correct_count, incorrect_count";

/// SQLite-backed review record store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create database at path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Every stored record, keyed by card id.
    pub fn all_records(&self) -> Result<HashMap<CardId, ReviewRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SELECT_COLUMNS} FROM review_records"))?;
        let rows = stmt.query_map([], RawRecord::from_row)?;

        let mut records = HashMap::new();
        for row in rows {
            let raw = row?;
            records.insert(raw.card_id, raw.into_record()?);
        }
        Ok(records)
    }
}

impl ReviewStore for SqliteStore {
    type Error = DbError;

    fn get(&self, card_id: CardId) -> Result<Option<ReviewRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM review_records WHERE card_id = ?1"),
                params![card_id],
                RawRecord::from_row,
            )
            .optional()?
            .map(RawRecord::into_record)
            .transpose()
    }

    fn put(&mut self, card_id: CardId, record: &ReviewRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO review_records (card_id, ease_factor, interval_days, repetitions, next_review_at, last_reviewed_at, total_reviews, correct_count, incorrect_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                card_id,
                record.ease_factor,
                record.interval_days,
                record.repetitions,
                record.next_review_at.to_rfc3339(),
                record.last_reviewed_at.to_rfc3339(),
                record.total_reviews,
                record.correct_count,
                record.incorrect_count,
            ],
        )?;
        Ok(())
    }
}

/// Row as stored, before timestamp parsing.
struct RawRecord {
    card_id: CardId,
    ease_factor: f64,
    interval_days: u32,
    repetitions: u32,
    next_review_at: String,
    last_reviewed_at: String,
    total_reviews: u32,
    correct_count: u32,
    incorrect_count: u32,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            card_id: row.get(0)?,
            ease_factor: row.get(1)?,
            interval_days: row.get(2)?,
            repetitions: row.get(3)?,
            next_review_at: row.get(4)?,
            last_reviewed_at: row.get(5)?,
            total_reviews: row.get(6)?,
            correct_count: row.get(7)?,
            incorrect_count: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<ReviewRecord> {
        Ok(ReviewRecord {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetitions: self.repetitions,
            next_review_at: parse_timestamp(self.card_id, &self.next_review_at)?,
            last_reviewed_at: parse_timestamp(self.card_id, &self.last_reviewed_at)?,
            total_reviews: self.total_reviews,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
        })
    }
}

fn parse_timestamp(card_id: CardId, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("card {card_id}: bad timestamp {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn sample(now: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            ease_factor: 2.36,
            interval_days: 6,
            repetitions: 2,
            next_review_at: now + Duration::days(6),
            last_reviewed_at: now,
            total_reviews: 3,
            correct_count: 2,
            incorrect_count: 1,
        }
    }

    #[test]
    fn missing_record_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn put_then_get_preserves_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let record = sample(Utc::now());
        store.put(7, &record).unwrap();
        assert_eq!(store.get(7).unwrap(), Some(record));
    }

    #[test]
    fn put_replaces_existing_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();
        store.put(7, &sample(now)).unwrap();

        let mut updated = sample(now);
        updated.total_reviews = 4;
        updated.correct_count = 3;
        store.put(7, &updated).unwrap();

        let all = store.all_records().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get(&7), Some(&updated));
    }

    #[test]
    fn inconsistent_counters_are_rejected() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut record = sample(Utc::now());
        record.total_reviews = 10;
        assert!(matches!(store.put(1, &record), Err(DbError::Sqlite(_))));
        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn corrupt_timestamp_is_invalid_data() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO review_records VALUES (1, 2.5, 1, 1, 'tomorrow', 'today', 1, 1, 0)",
                [],
            )
            .unwrap();
        assert!(matches!(store.get(1), Err(DbError::InvalidData(_))));
    }
}

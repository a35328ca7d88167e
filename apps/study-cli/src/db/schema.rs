//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local review database.
pub const SCHEMA: &str = r#"
-- One scheduling record per reviewed card
CREATE TABLE IF NOT EXISTS review_records (
    card_id INTEGER PRIMARY KEY,
    ease_factor REAL NOT NULL,
    interval_days INTEGER NOT NULL CHECK (interval_days >= 0),
    repetitions INTEGER NOT NULL CHECK (repetitions >= 0),
    next_review_at TEXT NOT NULL,
    last_reviewed_at TEXT NOT NULL,
    total_reviews INTEGER NOT NULL,
    correct_count INTEGER NOT NULL,
    incorrect_count INTEGER NOT NULL,
    CHECK (correct_count + incorrect_count = total_reviews)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE INDEX IF NOT EXISTS idx_review_records_due ON review_records(next_review_at);
"#;

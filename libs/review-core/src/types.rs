//! Core types for the review scheduler.

use crate::error::{Result, StudyError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card identifier used as the review store key.
pub type CardId = i64;

/// Card from the active deck's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Card {
    pub fn new(id: CardId, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Scheduling state of a single card.
///
/// A card that was never reviewed has no record at all; there is no
/// "zeroed" record standing in for that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub ease_factor: f64,
    pub interval_days: u32,
    pub repetitions: u32,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: DateTime<Utc>,
    pub total_reviews: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl ReviewRecord {
    /// Whether the card's next review time has been reached.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

/// Recall grade for one review, 0 (total failure) to 5 (effortless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;
    /// Lowest grade that counts as a successful recall.
    pub const PASS: u8 = 3;

    pub fn new(value: u8) -> Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(StudyError::InvalidQuality(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS
    }
}

impl TryFrom<u8> for Quality {
    type Error = StudyError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer buttons offered by the study UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLabel {
    Again,
    Hard,
    Good,
    Easy,
}

impl AnswerLabel {
    /// Quality grade for this label.
    ///
    /// `Hard` shares grade 3 with a bare pass.
    pub fn quality(self) -> Quality {
        let value = match self {
            Self::Again => 0,
            Self::Hard => 3,
            Self::Good => 4,
            Self::Easy => 5,
        };
        Quality(value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }

    /// Map a right/wrong check (typed answers) to a label.
    /// Wrong -> Again, Correct -> Good
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Good
        } else {
            Self::Again
        }
    }
}

impl FromStr for AnswerLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => Err(format!("unknown answer label: {other}")),
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl FromStr for MatchingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "case_insensitive" => Ok(Self::CaseInsensitive),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown matching mode: {other}")),
        }
    }
}

/// How a study session picks and orders its cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Shuffle the queue after due-sorting.
    pub shuffle: bool,
    /// Drop cards that are not yet due.
    pub due_only: bool,
    /// Maximum number of cards in the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quality_rejects_out_of_range() {
        assert!(Quality::new(5).is_ok());
        assert!(matches!(Quality::new(6), Err(StudyError::InvalidQuality(6))));
    }

    #[test]
    fn quality_pass_threshold() {
        assert!(!Quality::new(2).unwrap().is_pass());
        assert!(Quality::new(3).unwrap().is_pass());
    }

    #[test]
    fn label_quality_table() {
        let table: Vec<u8> = [
            AnswerLabel::Again,
            AnswerLabel::Hard,
            AnswerLabel::Good,
            AnswerLabel::Easy,
        ]
        .into_iter()
        .map(|label| label.quality().value())
        .collect();
        assert_eq!(table, vec![0, 3, 4, 5]);
    }

    #[test]
    fn label_parses_case_insensitively() {
        assert_eq!("Good".parse::<AnswerLabel>(), Ok(AnswerLabel::Good));
        assert_eq!(" easy ".parse::<AnswerLabel>(), Ok(AnswerLabel::Easy));
        assert!("meh".parse::<AnswerLabel>().is_err());
    }

    #[test]
    fn quality_deserialize_validates() {
        let ok: Quality = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Quality>("9").is_err());
    }

    #[test]
    fn card_hint_is_optional_in_json() {
        let card: Card = serde_json::from_str(r#"{"id":1,"front":"Q","back":"A"}"#).unwrap();
        assert_eq!(card, Card::new(1, "Q", "A"));
        let json = serde_json::to_string(&card.with_hint("think")).unwrap();
        assert!(json.contains("\"hint\":\"think\""));
    }
}

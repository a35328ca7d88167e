//! Card catalog loading.
//!
//! A deck file is a JSON array of `{id, front, back, hint?}` objects.

use review_core::{Card, CardId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read deck: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed deck: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
}

pub fn load_deck(path: &Path) -> Result<Vec<Card>, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_deck(&content)
}

pub fn parse_deck(content: &str) -> Result<Vec<Card>, CatalogError> {
    let cards: Vec<Card> = serde_json::from_str(content)?;

    let mut seen = HashSet::with_capacity(cards.len());
    for card in &cards {
        if !seen.insert(card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cards_with_optional_hint() {
        let cards = parse_deck(
            r#"[
                {"id": 1, "front": "2 + 2", "back": "4"},
                {"id": 2, "front": "Capital of France", "back": "Paris", "hint": "city of light"}
            ]"#,
        )
        .unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].hint, None);
        assert_eq!(cards[1].hint.as_deref(), Some("city of light"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = parse_deck(
            r#"[{"id": 3, "front": "a", "back": "b"}, {"id": 3, "front": "c", "back": "d"}]"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(3))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_deck("{"), Err(CatalogError::Json(_))));
    }
}

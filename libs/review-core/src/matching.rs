//! Answer matching for typed study mode.

use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    pub matching_mode: MatchingMode,
    /// Trimmed typed answer (for display).
    pub typed_normalized: String,
    /// Trimmed expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed answer to the expected answer.
pub fn compare_answers(
    typed: &str,
    expected: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    let typed_normalized = typed.trim().to_string();
    let expected_normalized = expected.trim().to_string();

    let similarity = match mode {
        MatchingMode::Exact => exact_score(typed_normalized == expected_normalized),
        MatchingMode::CaseInsensitive => exact_score(
            typed_normalized.to_lowercase() == expected_normalized.to_lowercase(),
        ),
        MatchingMode::Fuzzy => normalized_similarity(
            &typed_normalized.to_lowercase(),
            &expected_normalized.to_lowercase(),
        ),
    };
    let is_correct = match mode {
        MatchingMode::Fuzzy => similarity >= fuzzy_threshold,
        _ => similarity == 1.0,
    };

    MatchResult {
        is_correct,
        similarity,
        matching_mode: mode,
        typed_normalized,
        expected_normalized,
    }
}

fn exact_score(equal: bool) -> f64 {
    if equal {
        1.0
    } else {
        0.0
    }
}

/// Edit distance counted in chars: insertions, deletions and substitutions
/// each cost one.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    // row[j]: distance from the source prefix read so far to target[..j]
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, source_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &target_char) in target.iter().enumerate() {
            let above = row[j + 1];
            let replace = diagonal + usize::from(source_char != target_char);
            row[j + 1] = replace.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[target.len()]
}

/// Normalized similarity (0.0 to 1.0) based on Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_normalized_similarity() {
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert!((normalized_similarity("héllo", "hello") - 0.8).abs() < 1e-9);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn test_compare_exact() {
        assert!(compare_answers(" hello ", "hello", MatchingMode::Exact, 0.8).is_correct);
        assert!(!compare_answers("Hello", "hello", MatchingMode::Exact, 0.8).is_correct);
    }

    #[test]
    fn test_compare_case_insensitive_trims() {
        let result = compare_answers("  Paris\n", "paris", MatchingMode::CaseInsensitive, 0.8);
        assert!(result.is_correct);
        assert_eq!(result.typed_normalized, "Paris");
    }

    #[test]
    fn test_case_insensitive_keeps_inner_whitespace() {
        let result = compare_answers("new  york", "New York", MatchingMode::CaseInsensitive, 0.8);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_compare_fuzzy() {
        assert!(compare_answers("helo", "hello", MatchingMode::Fuzzy, 0.8).is_correct);
        assert!(!compare_answers("xyz", "hello", MatchingMode::Fuzzy, 0.8).is_correct);
    }
}

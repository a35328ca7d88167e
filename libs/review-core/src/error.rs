//! Error types for review-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors surfaced by the scheduler and the study session driver.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("invalid quality {0}: expected a grade between 0 and 5")]
    InvalidQuality(u8),

    #[error("no cards to study")]
    EmptyCardSet,

    #[error("study session is already complete")]
    SessionComplete,

    #[error("review record store unavailable: {0}")]
    RecordStoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StudyError {
    /// Wrap a store failure.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RecordStoreUnavailable(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_quality() {
        let error = StudyError::InvalidQuality(7);
        assert_eq!(
            error.to_string(),
            "invalid quality 7: expected a grade between 0 and 5"
        );
    }

    #[test]
    fn test_error_display_store() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let error = StudyError::store(io);
        assert_eq!(error.to_string(), "review record store unavailable: disk gone");
        assert!(std::error::Error::source(&error).is_some());
    }
}

//! Unified error type for pattern conversion.

use crate::image::ImageError;
use crate::matching::MatchError;

use super::budget::Stage;

/// Unified error type for the stitch-pattern public API.
///
/// Wraps the errors of every stage so callers can use `?` throughout.
///
/// # Example
///
/// ```
/// use stitch_pattern::{PatternConverter, PatternError, ThreadCatalog};
///
/// let catalog = ThreadCatalog::default();
/// let err = PatternConverter::new(&catalog)
///     .convert_raw(1, 1, &[0, 0, 0])
///     .unwrap_err();
/// assert!(matches!(err, PatternError::Match(_)));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// No thread could be matched
    #[error("thread matching failed: {0}")]
    Match(#[from] MatchError),

    /// The input image is unusable
    #[error("invalid image: {0}")]
    Image(#[from] ImageError),

    /// Conversion parameters are out of range
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The caller cancelled the conversion
    #[error("conversion cancelled before {stage} stage")]
    Cancelled {
        /// Stage that was about to start
        stage: Stage,
    },

    /// The conversion ran past its deadline
    #[error("conversion deadline exceeded before {stage} stage")]
    DeadlineExceeded {
        /// Stage that was about to start
        stage: Stage,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PatternError::Cancelled {
            stage: Stage::Quantize,
        };
        assert_eq!(err.to_string(), "conversion cancelled before quantize stage");

        let err = PatternError::from(MatchError::NoCandidateThread { brand: None });
        assert_eq!(
            err.to_string(),
            "thread matching failed: thread catalog is empty"
        );

        let err = PatternError::InvalidOptions("max_colors must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid options: max_colors must be at least 1");
    }
}

use thiserror::Error;

/// Errors raised while *building* a matcher.
///
/// Evaluating a matcher never fails: a mismatch is an [`crate::Outcome`], not an error.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("within_delta center must be a finite number, got {found}")]
    NonNumericCenter { found: &'static str },

    #[error("within_delta delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),

    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),
}

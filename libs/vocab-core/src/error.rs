//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Contract violations detected at function entry.
///
/// Empty working sets and unknown categories are ordinary return values,
/// never errors; the variants here all indicate a caller bug.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("mastery level {level} is out of range 0..=5")]
    InvalidLevel { level: u8 },

    #[error("negative answer counts: correct={correct}, wrong={wrong}")]
    InvalidCount { correct: i64, wrong: i64 },

    #[error("category review mode requires a non-empty category filter")]
    MissingCategory,
}

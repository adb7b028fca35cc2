//! Error types for `gradebook`

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, GradebookError>;

/// Everything that can go wrong while working with the record store
#[derive(Error, Debug)]
pub enum GradebookError {
    /// A course with this (normalized) code is already recorded
    #[error("Course already exists: {0}")]
    AlreadyExists(String),

    /// No course with this (normalized) code is recorded
    #[error("Course not found: {0}")]
    NotFound(String),

    /// Score outside the closed range [0, 10]
    #[error("Invalid score: {0} (expected a value between 0 and 10)")]
    InvalidScore(f64),

    /// Credits must be a positive number
    #[error("Invalid credits: {0} (expected a positive number)")]
    InvalidCredits(f64),

    /// Course code is empty after trimming
    #[error("Course code must not be empty")]
    InvalidCode,

    /// Reading or writing the gradebook file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The gradebook file is not valid JSON for the expected layout
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GradebookError {
    /// Whether this error is a rejected user request (as opposed to a storage failure)
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Parse(_))
    }
}

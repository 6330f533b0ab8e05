//! Error types for kgrade.
//!
//! Grading itself never fails: every problem found in a submission becomes a
//! `TestOutcome`. These errors cover the boundary instead (loading problems and
//! config, reading submission files, reporting a failing grade to the shell).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kgrade operations.
#[derive(Error, Debug)]
pub enum GradeError {
    /// User provided invalid arguments, files, or configuration.
    #[error("{0}")]
    UserError(String),

    /// The submission was graded but scored below the pass threshold.
    #[error("Validation failed: score {score} is below the pass threshold of {threshold}")]
    ValidationFailed { score: u8, threshold: u8 },
}

impl GradeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GradeError::UserError(_) => exit_codes::USER_ERROR,
            GradeError::ValidationFailed { .. } => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for kgrade operations.
pub type Result<T> = std::result::Result<T, GradeError>;

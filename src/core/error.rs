//! Error handling and error types for Confusion Stats.
//!
//! This module provides error handling using Rust's Result type system,
//! ensuring clear error propagation from the construction boundaries of the
//! library. Only malformed input is an error; degenerate statistics (division
//! by zero in a well-formed table) are reported as `NaN` by the accessors
//! themselves and never pass through these types.

use thiserror::Error;

/// Main error type for the confusion-stats library.
///
/// This enum covers the conditions that can occur while building a
/// contingency table from label sequences, raw count matrices, or proportion
/// matrices. Statistics accessors on an already-built table are infallible.
#[derive(Error, Debug)]
pub enum ConfusionError {
    /// A label fell outside the valid class range `[0, classes)`
    #[error("Label out of range: label {label}, number of classes {classes}")]
    LabelOutOfRange {
        /// The offending label value
        label: i64,
        /// The number of classes the table was constructed with
        classes: usize,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Description of the expected shape
        expected: String,
        /// Description of the actual shape
        actual: String,
    },

    /// Invalid input values (empty sequences, negative or non-finite cells)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the offending input
        message: String,
    },
}

/// Type alias for Results using ConfusionError
pub type Result<T> = std::result::Result<T, ConfusionError>;

/// Utility functions for error handling
impl ConfusionError {
    /// Create a label-out-of-range error
    pub fn label_out_of_range(label: i64, classes: usize) -> Self {
        ConfusionError::LabelOutOfRange { label, classes }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        ConfusionError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ConfusionError::InvalidInput {
            message: message.into(),
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            ConfusionError::LabelOutOfRange { .. } => "label_out_of_range",
            ConfusionError::DimensionMismatch { .. } => "dimension_mismatch",
            ConfusionError::InvalidInput { .. } => "invalid_input",
        }
    }
}

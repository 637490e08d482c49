// error.rs - Error types for the distance core

use thiserror::Error;

/// Errors raised by the distance pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    /// Caller input lacks the required shape (fatal)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A single gene slice is not 2 samples × 2 allele copies
    #[error("Input shape error for gene '{gene}': {message}")]
    InputShape { gene: String, message: String },

    /// A sample-pair slice does not reference exactly 2 samples
    #[error("Input cardinality error: expected 2 distinct samples, found {found}")]
    InputCardinality { found: usize },

    /// Flat upper-triangle reconstruction was given a set with gaps
    #[error("Incomplete triangle: expected {expected} pairwise values for {samples} samples, found {found}")]
    IncompleteTriangle {
        samples: usize,
        expected: usize,
        found: usize,
    },
}

/// Result alias for the distance core
pub type Result<T> = std::result::Result<T, DistanceError>;

impl DistanceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn input_shape(gene: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputShape {
            gene: gene.into(),
            message: message.into(),
        }
    }
}

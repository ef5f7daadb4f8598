//! Error types for page classification

use thiserror::Error;

/// Classification error type
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Invalid option value
    #[error("invalid classify option: {0}")]
    InvalidOption(String),
}

/// Result type alias for classification operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;

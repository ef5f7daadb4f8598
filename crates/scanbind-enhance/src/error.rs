//! Error types for image enhancement

use thiserror::Error;

/// Enhancement error type
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// The operation does not support the raster's pixel mode
    #[error("unsupported pixel mode: expected {expected}, got {actual}")]
    UnsupportedMode {
        expected: &'static str,
        actual: &'static str,
    },

    /// Invalid parameter value
    #[error("invalid enhance parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for enhancement operations
pub type EnhanceResult<T> = Result<T, EnhanceError>;

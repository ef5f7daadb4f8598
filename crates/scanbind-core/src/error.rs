//! Error types for scanbind-core
//!
//! Provides a unified error type for raster construction and conversion.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Core raster error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw buffer length does not match dimensions and pixel mode
    #[error("invalid data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}

/// Result type alias for core raster operations
pub type Result<T> = std::result::Result<T, Error>;

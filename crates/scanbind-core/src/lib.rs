//! scanbind-core - Basic data structures for page assembly
//!
//! This crate provides the fundamental image container used throughout
//! scanbind:
//!
//! - [`Raster`] - in-memory page image (RGB, grayscale, or bilevel)
//! - [`PixelMode`] - pixel representation of a raster
//! - representation conversions ([`Raster::to_rgb`], [`Raster::to_gray`])

pub mod convert;
pub mod error;
pub mod raster;

pub use convert::luminance;
pub use error::{Error, Result};
pub use raster::{PixelMode, Raster};

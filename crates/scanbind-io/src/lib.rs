//! scanbind-io - Image decoding and PDF assembly
//!
//! This crate handles everything that crosses the process boundary:
//!
//! - **Format detection** ([`format`]): magic-number sniffing for PNG
//!   and JPEG
//! - **Decoding** ([`png`], [`jpeg`]): file bytes to [`Raster`]
//! - **PDF assembly** ([`pdf`]): processed rasters to a multi-page
//!   document
//!
//! [`read_image`] is the usual entry point: it sniffs the format and
//! dispatches to the right decoder.

pub mod error;
pub mod format;
pub mod jpeg;
pub mod pdf;
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use jpeg::read_jpeg;
pub use pdf::{PdfOptions, write_pdf, write_pdf_mem, write_pdf_multi};
pub use png::read_png;

use scanbind_core::Raster;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read an image file into a [`Raster`].
///
/// The format is detected from the file's leading bytes, not its
/// extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized headers and
/// [`IoError::DecodeError`] for structurally invalid image data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let format = detect_format(&path)?;
    let reader = BufReader::new(File::open(&path)?);
    match format {
        ImageFormat::Png => read_png(reader),
        ImageFormat::Jpeg => read_jpeg(reader),
    }
}

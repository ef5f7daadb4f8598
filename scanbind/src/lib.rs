//! scanbind - Scanned-page classification and PDF binding
//!
//! scanbind turns a directory of scanned page images into a single
//! multi-page PDF. Each page is classified by its color content and
//! enhanced accordingly before assembly:
//!
//! - **Color** pages are kept as 3-channel RGB
//! - **Grayscale** pages are reduced to single-channel intensity
//! - **BlackAndWhite** text pages are contrast-boosted, sharpened, and
//!   binarized to 1 bit per pixel
//!
//! The first page of a document is always kept in color (cover-page
//! policy). Pages appear in the output in lexicographic filename order.
//!
//! # Example
//!
//! ```no_run
//! use scanbind::pipeline::{PipelineOptions, assemble};
//!
//! let options = PipelineOptions {
//!     pattern: "scans/*.png".to_string(),
//!     ..Default::default()
//! };
//! let report = assemble(&options).unwrap();
//! println!("bound {} pages", report.len());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scanbind_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use scanbind_classify as classify;
pub use scanbind_enhance as enhance;
pub use scanbind_io as io;

pub mod pipeline;

pub use pipeline::{
    PageRecord, PipelineError, PipelineOptions, PipelineResult, assemble, discover_inputs,
    prepare_page,
};

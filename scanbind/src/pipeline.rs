//! Pipeline orchestration
//!
//! Ties the domain crates together: discover input files, classify each
//! page, apply the category-specific enhancement, and serialize the
//! resulting sequence into one multi-page PDF.
//!
//! Pages are processed strictly sequentially in lexicographic filename
//! order; that order is the page-order contract of the output document.
//! Any failure aborts the whole run and no output file is written.

use scanbind_classify::{ClassifyError, ClassifyOptions, PageKind, classify};
use scanbind_core::Raster;
use scanbind_enhance::{EnhanceError, binarize, contrast, sharpen};
use scanbind_io::{IoError, PdfOptions, read_image, write_pdf_multi};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Contrast gain applied to black-and-white text pages.
const TEXT_CONTRAST_GAIN: f32 = 2.6;

/// Sharpening gain applied to black-and-white text pages.
const TEXT_SHARPEN_GAIN: f32 = 1.8;

/// Pipeline error type
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input glob pattern is malformed
    #[error("invalid input pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The input glob pattern matched no files
    #[error("no input files match {pattern:?}")]
    NoInputFiles { pattern: String },

    /// A matched path could not be listed
    #[error("failed to list input files: {0}")]
    Discovery(#[from] glob::GlobError),

    /// A page image could not be read or decoded
    #[error("failed to read page {path:?}: {source}")]
    ReadPage {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// Page classification failed
    #[error("failed to classify page {path:?}: {source}")]
    Classify {
        path: PathBuf,
        #[source]
        source: ClassifyError,
    },

    /// Page enhancement failed
    #[error("failed to enhance page {path:?}: {source}")]
    Enhance {
        path: PathBuf,
        #[source]
        source: EnhanceError,
    },

    /// The output document could not be written
    #[error("failed to write document {path:?}: {source}")]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline configuration
///
/// Every knob has a default matching the defaults of the CLI surface.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Glob pattern selecting the input page images
    pub pattern: String,
    /// Output document path
    pub output: PathBuf,
    /// Page-sizing resolution metadata in pixels per inch
    pub resolution: u32,
    /// Binarization threshold for black-and-white pages
    pub bw_threshold: u8,
    /// Classifier thresholds
    pub classify: ClassifyOptions,
    /// Optional document title metadata
    pub title: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pattern: "screenshots/*.png".to_string(),
            output: PathBuf::from("output.pdf"),
            resolution: 300,
            bw_threshold: 175,
            classify: ClassifyOptions::default(),
            title: None,
        }
    }
}

/// One processed page in the run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Source image path
    pub path: PathBuf,
    /// Category the page was processed as
    pub kind: PageKind,
}

/// Expand the input pattern into a sorted list of page files.
///
/// The list is sorted lexicographically by path; this sort order is the
/// page order of the final document and is stable across runs on the
/// same file set.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidPattern`] for a malformed pattern
/// and [`PipelineError::NoInputFiles`] if nothing matches.
pub fn discover_inputs(pattern: &str) -> PipelineResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| PipelineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        files.push(entry?);
    }
    files.sort();

    if files.is_empty() {
        return Err(PipelineError::NoInputFiles {
            pattern: pattern.to_string(),
        });
    }
    Ok(files)
}

/// Apply the category-specific transform to a decoded page.
///
/// - Color pages become 3-channel RGB
/// - Grayscale pages become single-channel intensity
/// - Black-and-white pages are contrast-boosted, sharpened, and
///   binarized into a 1-bit raster
///
/// The input raster is never modified.
pub fn prepare_page(
    raster: &Raster,
    kind: PageKind,
    bw_threshold: u8,
) -> Result<Raster, EnhanceError> {
    match kind {
        PageKind::Color => Ok(raster.to_rgb()),
        PageKind::Grayscale => Ok(raster.to_gray()),
        PageKind::BlackAndWhite => {
            let gray = raster.to_gray();
            let boosted = contrast(&gray, TEXT_CONTRAST_GAIN)?;
            let sharpened = sharpen(&boosted, TEXT_SHARPEN_GAIN)?;
            binarize(&sharpened, bw_threshold)
        }
    }
}

/// Run the whole pipeline: discover, classify, enhance, serialize.
///
/// The first page is always processed as Color regardless of its pixel
/// content (cover-page policy); every later page is classified. The
/// document is serialized to a sibling temp file and renamed into place
/// once complete, so a failed run leaves nothing at the output path.
///
/// Returns one [`PageRecord`] per page, in page order.
pub fn assemble(options: &PipelineOptions) -> PipelineResult<Vec<PageRecord>> {
    let inputs = discover_inputs(&options.pattern)?;
    tracing::debug!(pattern = %options.pattern, files = inputs.len(), "discovered input pages");

    let mut pages = Vec::with_capacity(inputs.len());
    let mut records = Vec::with_capacity(inputs.len());

    for (index, path) in inputs.iter().enumerate() {
        let raster = read_image(path).map_err(|source| PipelineError::ReadPage {
            path: path.clone(),
            source,
        })?;

        // Cover-page policy: the first page always stays in color
        let kind = if index == 0 {
            PageKind::Color
        } else {
            classify(&raster, &options.classify).map_err(|source| PipelineError::Classify {
                path: path.clone(),
                source,
            })?
        };

        let page =
            prepare_page(&raster, kind, options.bw_threshold).map_err(|source| {
                PipelineError::Enhance {
                    path: path.clone(),
                    source,
                }
            })?;
        tracing::info!(path = %path.display(), kind = kind.label(), "processed page");

        pages.push(page);
        records.push(PageRecord {
            path: path.clone(),
            kind,
        });
    }

    let pdf_options = PdfOptions {
        resolution: options.resolution,
        title: options.title.clone(),
    };
    write_output(&pages, &options.output, &pdf_options).map_err(|source| {
        PipelineError::WriteDocument {
            path: options.output.clone(),
            source,
        }
    })?;
    tracing::info!(output = %options.output.display(), pages = records.len(), "wrote document");

    Ok(records)
}

/// Serialize the pages through a buffered writer.
///
/// The buffer is flushed explicitly; a flush in `Drop` would discard
/// write errors, and a small document can sit entirely in the buffer
/// until then.
fn serialize_document<W: Write>(
    pages: &[Raster],
    writer: W,
    options: &PdfOptions,
) -> Result<(), IoError> {
    let mut writer = BufWriter::new(writer);
    write_pdf_multi(pages, &mut writer, options)?;
    writer.flush()?;
    Ok(())
}

/// Write the document to a sibling temp file and rename it into place.
///
/// The output path only ever sees a complete document; a failed write
/// removes the temp file and leaves the output path untouched.
fn write_output(pages: &[Raster], output: &Path, options: &PdfOptions) -> Result<(), IoError> {
    let tmp = output.with_extension("pdf.part");
    let file = File::create(&tmp)?;
    if let Err(e) = serialize_document(pages, file, options) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, output) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanbind_core::PixelMode;

    fn text_page(w: u32, h: u32) -> Raster {
        let mut raster = Raster::new(w, h, PixelMode::Gray).unwrap();
        for y in 0..h {
            for x in 0..w {
                let ink = x % 4 == 0 && y % 4 == 0;
                raster.set_gray(x, y, if ink { 0 } else { 255 });
            }
        }
        raster
    }

    #[test]
    fn test_prepare_color_page() {
        let gray = Raster::new(8, 8, PixelMode::Gray).unwrap();
        let page = prepare_page(&gray, PageKind::Color, 175).unwrap();
        assert_eq!(page.mode(), PixelMode::Rgb);
    }

    #[test]
    fn test_prepare_grayscale_page() {
        let rgb = Raster::new(8, 8, PixelMode::Rgb).unwrap();
        let page = prepare_page(&rgb, PageKind::Grayscale, 175).unwrap();
        assert_eq!(page.mode(), PixelMode::Gray);
    }

    #[test]
    fn test_prepare_black_and_white_page() {
        let page = prepare_page(&text_page(16, 16), PageKind::BlackAndWhite, 175).unwrap();
        assert_eq!(page.mode(), PixelMode::Bilevel);
        // Background stays white, ink stays black through the chain
        assert!(page.bit_at(1, 1));
        assert!(!page.bit_at(4, 4));
    }

    #[test]
    fn test_prepare_never_mutates_input() {
        let source = text_page(16, 16);
        let copy = source.clone();
        let _ = prepare_page(&source, PageKind::BlackAndWhite, 175).unwrap();
        assert_eq!(source, copy);
    }

    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_buffered_write_error_is_surfaced() {
        // A small document fits entirely in the writer's buffer; the
        // device error must still come back from the explicit flush.
        let page = Raster::new(8, 8, PixelMode::Gray).unwrap();
        let err = serialize_document(&[page], FullDevice, &PdfOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = discover_inputs("a[");
        assert!(matches!(err, Err(PipelineError::InvalidPattern { .. })));
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.resolution, 300);
        assert_eq!(options.bw_threshold, 175);
        assert_eq!(options.output, PathBuf::from("output.pdf"));
    }
}

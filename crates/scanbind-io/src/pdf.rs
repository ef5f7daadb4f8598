//! PDF document assembly (write-only)
//!
//! Serializes processed page rasters into a single multi-page PDF using
//! the `pdf-writer` crate. Each raster becomes one page whose media box
//! is derived from the pixel dimensions and the effective resolution.
//!
//! Image streams are Flate-compressed. Gray pages are embedded as 8-bit
//! DeviceGray, color pages as 8-bit DeviceRGB, and bilevel pages as
//! genuine 1-bit DeviceGray streams (the raster's packed rows are
//! already in the byte-aligned layout PDF expects).

use crate::{IoError, IoResult};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use scanbind_core::{PixelMode, Raster};
use std::io::Write;

/// Color space for an embedded page image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PdfColorSpace {
    DeviceGray,
    DeviceRgb,
}

/// Default resolution when neither the options nor the raster carry one
const DEFAULT_RESOLUTION: u32 = 300;

/// Points per inch in PDF coordinates
const POINTS_PER_INCH: f32 = 72.0;

/// Flate compression level for image streams
const FLATE_LEVEL: u8 = 6;

/// PDF output options
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Resolution in PPI used for page sizing
    /// (0 to use each raster's resolution, with 300 as fallback)
    pub resolution: u32,
    /// Document title
    pub title: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            resolution: 0,
            title: None,
        }
    }
}

impl PdfOptions {
    /// Create options with a specific title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the resolution
    pub fn resolution(mut self, res: u32) -> Self {
        self.resolution = res;
        self
    }
}

/// Write a single raster to PDF bytes
pub fn write_pdf_mem(raster: &Raster, options: &PdfOptions) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_pdf(raster, &mut buffer, options)?;
    Ok(buffer)
}

/// Write a single raster as a one-page PDF
pub fn write_pdf<W: Write>(raster: &Raster, mut writer: W, options: &PdfOptions) -> IoResult<()> {
    let pdf_data = generate_pdf(std::slice::from_ref(raster), options)?;
    writer.write_all(&pdf_data).map_err(IoError::Io)?;
    Ok(())
}

/// Write multiple rasters to a multi-page PDF
///
/// Each raster becomes one page, in slice order.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] for an empty slice; a document
/// needs at least one page.
pub fn write_pdf_multi<W: Write>(
    pages: &[Raster],
    mut writer: W,
    options: &PdfOptions,
) -> IoResult<()> {
    let pdf_data = generate_pdf(pages, options)?;
    writer.write_all(&pdf_data).map_err(IoError::Io)?;
    Ok(())
}

/// Generate PDF data from page rasters
fn generate_pdf(pages: &[Raster], options: &PdfOptions) -> IoResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(IoError::InvalidData("no pages provided".to_string()));
    }

    let mut pdf = Pdf::new();

    // Object reference allocation:
    // Catalog(1), Pages(2), then a [Page, Contents, XObject] triple per page
    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_refs: Vec<Ref> = (0..pages.len())
        .map(|i| Ref::new((3 + i * 3) as i32))
        .collect();

    pdf.catalog(catalog_id).pages(pages_id);

    if let Some(ref title) = options.title {
        let info_id = Ref::new((3 + pages.len() * 3) as i32);
        pdf.document_info(info_id).title(TextStr(title));
    }

    pdf.pages(pages_id)
        .kids(page_refs.iter().copied())
        .count(pages.len() as i32);

    for (i, raster) in pages.iter().enumerate() {
        let page_id = Ref::new((3 + i * 3) as i32);
        let contents_id = Ref::new((4 + i * 3) as i32);
        let image_id = Ref::new((5 + i * 3) as i32);
        write_page(&mut pdf, raster, page_id, pages_id, contents_id, image_id, options);
    }

    Ok(pdf.finish())
}

/// Resolution used for a page: explicit option, then raster metadata,
/// then the 300 PPI default.
fn effective_resolution(raster: &Raster, options: &PdfOptions) -> u32 {
    if options.resolution > 0 {
        options.resolution
    } else if raster.resolution() > 0 {
        raster.resolution()
    } else {
        DEFAULT_RESOLUTION
    }
}

/// Write a single page and its image stream to the PDF
fn write_page(
    pdf: &mut Pdf,
    raster: &Raster,
    page_id: Ref,
    pages_id: Ref,
    contents_id: Ref,
    image_id: Ref,
    options: &PdfOptions,
) {
    let width = raster.width();
    let height = raster.height();
    let res = effective_resolution(raster, options);

    let width_pt = width as f32 * POINTS_PER_INCH / res as f32;
    let height_pt = height as f32 * POINTS_PER_INCH / res as f32;

    let (color_space, bits_per_component) = match raster.mode() {
        PixelMode::Rgb => (PdfColorSpace::DeviceRgb, 8),
        PixelMode::Gray => (PdfColorSpace::DeviceGray, 8),
        PixelMode::Bilevel => (PdfColorSpace::DeviceGray, 1),
    };
    let compressed = compress_to_vec_zlib(raster.data(), FLATE_LEVEL);

    let mut image = pdf.image_xobject(image_id, &compressed);
    image.filter(Filter::FlateDecode);
    image.width(width as i32);
    image.height(height as i32);
    match color_space {
        PdfColorSpace::DeviceGray => image.color_space().device_gray(),
        PdfColorSpace::DeviceRgb => image.color_space().device_rgb(),
    }
    image.bits_per_component(bits_per_component);
    image.finish();

    // Page contents: scale the unit-square image to the page size.
    // PDF's origin is bottom-left with Y increasing upward.
    let mut content = Content::new();
    content.save_state();
    content.transform([width_pt, 0.0, 0.0, height_pt, 0.0, 0.0]);
    content.x_object(Name(b"Im0"));
    content.restore_state();
    let content_data = content.finish();

    pdf.stream(contents_id, &content_data);

    let mut page = pdf.page(page_id);
    page.parent(pages_id);
    page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
    page.contents(contents_id);
    page.resources().x_objects().pair(Name(b"Im0"), image_id);
    page.finish();
}

//! scanbind-classify - Page color-content classification
//!
//! Assigns each scanned page one of three categories from sampled pixel
//! statistics:
//!
//! - **Color**: enough sampled pixels diverge strongly between their
//!   R, G and B channels
//! - **BlackAndWhite**: white-dominated pages with some black ink and
//!   little intermediate shading (typical printed text)
//! - **Grayscale**: everything else
//!
//! Classification is a pure function of the image content and the
//! [`ClassifyOptions`] thresholds; it never modifies the input.

mod error;

pub use error::{ClassifyError, ClassifyResult};

use scanbind_core::{Raster, luminance};

/// Intensity above which a sampled pixel counts as white background.
const WHITE_POINT: u8 = 235;

/// Intensity below which a sampled pixel counts as black ink.
const BLACK_POINT: u8 = 45;

/// Page category assigned by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Full color page
    Color,
    /// Continuous-tone single-channel page
    Grayscale,
    /// Black text on white background
    BlackAndWhite,
}

impl PageKind {
    /// Short lowercase label for logging.
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Color => "color",
            PageKind::Grayscale => "grayscale",
            PageKind::BlackAndWhite => "black-and-white",
        }
    }
}

/// Threshold bundle for [`classify`]
///
/// The defaults are tuned for scanned book and screenshot pages and are
/// deliberately conservative about declaring a page colored.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Grid step for pixel sampling; every Nth row and column is inspected
    pub sample_step: u32,
    /// A sampled pixel is "strongly colored" if its channel divergence
    /// strictly exceeds this value
    pub rgb_diff_threshold: u8,
    /// Minimum fraction of strongly colored samples for a Color verdict
    pub color_ratio_threshold: f32,
    /// Minimum fraction of white samples for a BlackAndWhite verdict
    pub text_white_ratio: f32,
    /// Minimum fraction of black samples for a BlackAndWhite verdict
    pub text_black_ratio: f32,
    /// Maximum fraction of mid-gray samples for a BlackAndWhite verdict
    pub mid_gray_ratio_max: f32,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            sample_step: 10,
            rgb_diff_threshold: 28,
            color_ratio_threshold: 0.12,
            text_white_ratio: 0.65,
            text_black_ratio: 0.01,
            mid_gray_ratio_max: 0.25,
        }
    }
}

/// Compute the color divergence of a pixel.
///
/// Divergence is the maximum of the three pairwise absolute differences
/// between the R, G and B channel values. It is near zero for neutral
/// gray pixels and large for saturated colors.
#[inline]
pub fn color_divergence(r: u8, g: u8, b: u8) -> u8 {
    let rg = r.abs_diff(g);
    let rb = r.abs_diff(b);
    let gb = g.abs_diff(b);
    rg.max(rb).max(gb)
}

/// Classify a page image by its color content.
///
/// Samples a sparse grid of pixels (every `sample_step`-th row and
/// column). If the fraction of strongly colored samples reaches
/// `color_ratio_threshold` the page is Color and no further analysis
/// runs. Otherwise the sampled intensities are split into white, black
/// and mid-gray bands; a white-dominated page with some black ink and
/// little mid-gray is BlackAndWhite, anything else Grayscale.
///
/// A degenerate sample set (no pixels inspected) classifies as
/// Grayscale.
///
/// # Errors
///
/// Returns [`ClassifyError::InvalidOption`] if `sample_step` is 0.
pub fn classify(raster: &Raster, options: &ClassifyOptions) -> ClassifyResult<PageKind> {
    if options.sample_step == 0 {
        return Err(ClassifyError::InvalidOption(
            "sample_step must be >= 1".into(),
        ));
    }

    let rgb = raster.to_rgb();
    let step = options.sample_step as usize;
    let (w, h) = (rgb.width(), rgb.height());

    let mut total = 0u64;
    let mut strong_color = 0u64;
    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            let (r, g, b) = rgb.rgb_at(x, y);
            total += 1;
            if color_divergence(r, g, b) > options.rgb_diff_threshold {
                strong_color += 1;
            }
        }
    }

    if total == 0 {
        return Ok(PageKind::Grayscale);
    }
    if strong_color as f32 / total as f32 >= options.color_ratio_threshold {
        return Ok(PageKind::Color);
    }

    let mut white = 0u64;
    let mut black = 0u64;
    let mut mid = 0u64;
    for y in (0..h).step_by(step) {
        for x in (0..w).step_by(step) {
            let (r, g, b) = rgb.rgb_at(x, y);
            let v = luminance(r, g, b);
            if v > WHITE_POINT {
                white += 1;
            } else if v < BLACK_POINT {
                black += 1;
            } else {
                mid += 1;
            }
        }
    }

    let white_ratio = white as f32 / total as f32;
    let black_ratio = black as f32 / total as f32;
    let mid_ratio = mid as f32 / total as f32;

    if white_ratio >= options.text_white_ratio
        && black_ratio >= options.text_black_ratio
        && mid_ratio <= options.mid_gray_ratio_max
    {
        return Ok(PageKind::BlackAndWhite);
    }

    Ok(PageKind::Grayscale)
}

//! scanbind-enhance - Per-page image enhancement
//!
//! Operations used to clean up text pages before document assembly:
//!
//! - **Contrast** ([`contrast`]): lookup-table gain about the intensity
//!   midpoint
//! - **Sharpening** ([`sharpen`]): unsharp extrapolation against a 3x3
//!   smoothed copy
//! - **Binarization** ([`binarize`]): fixed-threshold reduction to a
//!   1-bit-per-pixel raster
//!
//! All operations take an intensity (grayscale) raster and return a new
//! raster; the input is never modified.

mod error;

pub use error::{EnhanceError, EnhanceResult};

use scanbind_core::{PixelMode, Raster};

/// Midpoint that contrast enhancement scales intensities away from.
const CONTRAST_MIDPOINT: f32 = 128.0;

/// 3x3 smoothing kernel used by [`sharpen`] (weights sum to 13).
const SMOOTH_KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];

/// Sum of the [`SMOOTH_KERNEL`] weights.
const SMOOTH_WEIGHT: f32 = 13.0;

/// A 256-entry lookup table mapping input to output intensities.
pub type IntensityLut = [u8; 256];

fn mode_name(mode: PixelMode) -> &'static str {
    match mode {
        PixelMode::Rgb => "rgb",
        PixelMode::Gray => "gray",
        PixelMode::Bilevel => "bilevel",
    }
}

fn require_gray(raster: &Raster) -> EnhanceResult<()> {
    if raster.mode() != PixelMode::Gray {
        return Err(EnhanceError::UnsupportedMode {
            expected: "gray",
            actual: mode_name(raster.mode()),
        });
    }
    Ok(())
}

/// Generate a contrast enhancement lookup table.
///
/// Maps `i` to `128 + factor * (i - 128)`, clamped to `[0, 255]`.
/// A factor of 1.0 is the identity; larger factors push intensities
/// away from the midpoint, a factor of 0.0 collapses everything to it.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidParameter`] if `factor` is negative
/// or not finite.
pub fn contrast_lut(factor: f32) -> EnhanceResult<IntensityLut> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(EnhanceError::InvalidParameter(
            "contrast factor must be finite and >= 0.0".into(),
        ));
    }
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let mapped = CONTRAST_MIDPOINT + factor * (i as f32 - CONTRAST_MIDPOINT);
        *entry = mapped.round().clamp(0.0, 255.0) as u8;
    }
    Ok(lut)
}

/// Apply a lookup table to an intensity raster.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedMode`] if the raster is not gray.
pub fn apply_lut(raster: &Raster, lut: &IntensityLut) -> EnhanceResult<Raster> {
    require_gray(raster)?;
    let data = raster.data().iter().map(|&v| lut[v as usize]).collect();
    let mut out = Raster::from_raw(raster.width(), raster.height(), PixelMode::Gray, data)
        .expect("buffer sized from source dimensions");
    out.set_resolution(raster.resolution());
    Ok(out)
}

/// Apply contrast enhancement with the given gain factor.
///
/// See [`contrast_lut`] for the mapping.
pub fn contrast(raster: &Raster, factor: f32) -> EnhanceResult<Raster> {
    let lut = contrast_lut(factor)?;
    apply_lut(raster, &lut)
}

/// Apply sharpening with the given gain factor.
///
/// Smooths the image with a 3x3 kernel and extrapolates each pixel away
/// from its smoothed value: `out = smooth + factor * (src - smooth)`.
/// A factor of 1.0 is the identity, larger factors emphasize edges.
/// The one-pixel border is copied through unchanged, as is the whole
/// image when either dimension is below 3.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedMode`] if the raster is not gray
/// and [`EnhanceError::InvalidParameter`] for a negative or non-finite
/// factor.
pub fn sharpen(raster: &Raster, factor: f32) -> EnhanceResult<Raster> {
    require_gray(raster)?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(EnhanceError::InvalidParameter(
            "sharpen factor must be finite and >= 0.0".into(),
        ));
    }

    let mut out = raster.clone();
    let (w, h) = (raster.width(), raster.height());
    if w < 3 || h < 3 {
        return Ok(out);
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = 0u32;
            for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let sx = x + kx as u32 - 1;
                    let sy = y + ky as u32 - 1;
                    acc += weight * raster.gray_at(sx, sy) as u32;
                }
            }
            let smooth = acc as f32 / SMOOTH_WEIGHT;
            let src = raster.gray_at(x, y) as f32;
            let mapped = smooth + factor * (src - smooth);
            out.set_gray(x, y, mapped.round().clamp(0.0, 255.0) as u8);
        }
    }
    Ok(out)
}

/// Binarize an intensity raster at a fixed threshold.
///
/// Pixels strictly greater than `threshold` become white, all others
/// black. The result is a 1-bit-per-pixel bilevel raster.
///
/// # Errors
///
/// Returns [`EnhanceError::UnsupportedMode`] if the raster is not gray.
pub fn binarize(raster: &Raster, threshold: u8) -> EnhanceResult<Raster> {
    require_gray(raster)?;
    let (w, h) = (raster.width(), raster.height());
    let mut out =
        Raster::new(w, h, PixelMode::Bilevel).expect("source dimensions are nonzero");
    for y in 0..h {
        for x in 0..w {
            if raster.gray_at(x, y) > threshold {
                out.set_bit(x, y, true);
            }
        }
    }
    out.set_resolution(raster.resolution());
    Ok(out)
}

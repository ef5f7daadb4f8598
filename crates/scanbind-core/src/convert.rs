//! Representation conversions between pixel modes
//!
//! Conversions always produce a new [`Raster`]; the source is never
//! modified. Resolution metadata is carried over.

use crate::raster::{PixelMode, Raster};

/// Compute the luminance of an RGB pixel using ITU-R BT.601 weights.
///
/// `0.299 R + 0.587 G + 0.114 B`, rounded to the nearest integer.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32 + 0.5;
    (lum as u32).min(255) as u8
}

impl Raster {
    /// Convert to 3-channel color representation.
    ///
    /// Gray pixels are replicated into R=G=B; bilevel pixels map to pure
    /// black or pure white. An Rgb source is returned as a copy.
    pub fn to_rgb(&self) -> Raster {
        let w = self.width();
        let h = self.height();
        match self.mode() {
            PixelMode::Rgb => self.clone(),
            PixelMode::Gray => {
                let mut data = Vec::with_capacity(w as usize * h as usize * 3);
                for &v in self.data() {
                    data.extend_from_slice(&[v, v, v]);
                }
                let mut out = Raster::from_raw(w, h, PixelMode::Rgb, data)
                    .expect("buffer sized from source dimensions");
                out.set_resolution(self.resolution());
                out
            }
            PixelMode::Bilevel => {
                let mut out = Raster::new(w, h, PixelMode::Rgb)
                    .expect("source dimensions are nonzero");
                for y in 0..h {
                    for x in 0..w {
                        let v = if self.bit_at(x, y) { 255 } else { 0 };
                        out.set_rgb(x, y, v, v, v);
                    }
                }
                out.set_resolution(self.resolution());
                out
            }
        }
    }

    /// Convert to single-channel intensity representation.
    ///
    /// Rgb pixels are reduced with [`luminance`]; bilevel pixels map to
    /// 0 or 255. A Gray source is returned as a copy.
    pub fn to_gray(&self) -> Raster {
        let w = self.width();
        let h = self.height();
        match self.mode() {
            PixelMode::Gray => self.clone(),
            PixelMode::Rgb => {
                let mut data = Vec::with_capacity(w as usize * h as usize);
                for px in self.data().chunks_exact(3) {
                    data.push(luminance(px[0], px[1], px[2]));
                }
                let mut out = Raster::from_raw(w, h, PixelMode::Gray, data)
                    .expect("buffer sized from source dimensions");
                out.set_resolution(self.resolution());
                out
            }
            PixelMode::Bilevel => {
                let mut out = Raster::new(w, h, PixelMode::Gray)
                    .expect("source dimensions are nonzero");
                for y in 0..h {
                    for x in 0..w {
                        out.set_gray(x, y, if self.bit_at(x, y) { 255 } else { 0 });
                    }
                }
                out.set_resolution(self.resolution());
                out
            }
        }
    }
}

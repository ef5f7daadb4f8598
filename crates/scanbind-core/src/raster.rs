//! Raster - the in-memory page image container
//!
//! A [`Raster`] holds decoded pixel data for a single scanned page in one
//! of three representations:
//!
//! - **Rgb**: 3 bytes per pixel, row-major, R then G then B
//! - **Gray**: 1 byte per pixel, 0 = black, 255 = white
//! - **Bilevel**: 1 bit per pixel, packed MSB-first, rows padded to a byte
//!   boundary; a set bit is white, a clear bit is black
//!
//! Rasters are never mutated by the processing pipeline; every transform
//! produces a new `Raster`. The mutating accessors exist for constructing
//! images (decoders, transforms, test fixtures).

use crate::error::{Error, Result};

/// Pixel representation of a [`Raster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// 3-channel color, 8 bits per channel
    Rgb,
    /// Single-channel intensity, 8 bits per pixel
    Gray,
    /// Binary image, 1 bit per pixel (set = white)
    Bilevel,
}

impl PixelMode {
    /// Number of bits used to encode one pixel.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelMode::Rgb => 24,
            PixelMode::Gray => 8,
            PixelMode::Bilevel => 1,
        }
    }

    /// Number of bytes in one row of a raster of the given width.
    ///
    /// Bilevel rows are padded to a whole byte.
    pub fn row_stride(self, width: u32) -> usize {
        match self {
            PixelMode::Rgb => width as usize * 3,
            PixelMode::Gray => width as usize,
            PixelMode::Bilevel => (width as usize).div_ceil(8),
        }
    }
}

/// In-memory page image
///
/// # Examples
///
/// ```
/// use scanbind_core::{PixelMode, Raster};
///
/// let raster = Raster::new(640, 480, PixelMode::Gray).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: PixelMode,
    /// Resolution in pixels per inch, 0 if unknown
    resolution: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Create a new raster with all pixels set to zero.
    ///
    /// Zero means black for Rgb, Gray and Bilevel alike.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, mode: PixelMode) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u8; mode.row_stride(width) * height as usize];
        Ok(Raster {
            width,
            height,
            mode,
            resolution: 0,
            data,
        })
    }

    /// Create a raster from a raw pixel buffer.
    ///
    /// The buffer layout must match the mode's [`PixelMode::row_stride`]
    /// times the height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::InvalidDataLength`] if the buffer size does not match.
    pub fn from_raw(width: u32, height: u32, mode: PixelMode, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = mode.row_stride(width) * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            mode,
            resolution: 0,
            data,
        })
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel representation.
    #[inline]
    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Get the resolution in pixels per inch (0 if unknown).
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Set the resolution in pixels per inch.
    pub fn set_resolution(&mut self, ppi: u32) {
        self.resolution = ppi;
    }

    /// Number of bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.mode.row_stride(self.width)
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable raw access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get one row of pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Read an RGB pixel.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Rgb`] or the coordinates are
    /// out of bounds.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        assert_eq!(self.mode, PixelMode::Rgb, "rgb_at on {:?} raster", self.mode);
        let i = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Write an RGB pixel.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Rgb`] or the coordinates are
    /// out of bounds.
    #[inline]
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        assert_eq!(self.mode, PixelMode::Rgb, "set_rgb on {:?} raster", self.mode);
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data[i] = r;
        self.data[i + 1] = g;
        self.data[i + 2] = b;
    }

    /// Read a grayscale pixel.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Gray`] or the coordinates are
    /// out of bounds.
    #[inline]
    pub fn gray_at(&self, x: u32, y: u32) -> u8 {
        assert_eq!(self.mode, PixelMode::Gray, "gray_at on {:?} raster", self.mode);
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Write a grayscale pixel.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Gray`] or the coordinates are
    /// out of bounds.
    #[inline]
    pub fn set_gray(&mut self, x: u32, y: u32, value: u8) {
        assert_eq!(self.mode, PixelMode::Gray, "set_gray on {:?} raster", self.mode);
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// Read a bilevel pixel; `true` is white.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Bilevel`] or the coordinates
    /// are out of bounds.
    #[inline]
    pub fn bit_at(&self, x: u32, y: u32) -> bool {
        assert_eq!(
            self.mode,
            PixelMode::Bilevel,
            "bit_at on {:?} raster",
            self.mode
        );
        assert!(x < self.width, "x {} out of bounds", x);
        let byte = self.data[y as usize * self.row_stride() + (x / 8) as usize];
        (byte >> (7 - (x % 8))) & 1 == 1
    }

    /// Write a bilevel pixel; `true` is white.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not [`PixelMode::Bilevel`] or the coordinates
    /// are out of bounds.
    #[inline]
    pub fn set_bit(&mut self, x: u32, y: u32, white: bool) {
        assert_eq!(
            self.mode,
            PixelMode::Bilevel,
            "set_bit on {:?} raster",
            self.mode
        );
        assert!(x < self.width, "x {} out of bounds", x);
        let stride = self.row_stride();
        let byte = &mut self.data[y as usize * stride + (x / 8) as usize];
        let mask = 1u8 << (7 - (x % 8));
        if white {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Check if two rasters have the same width, height, and mode.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height && self.mode == other.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_mode() {
        assert_eq!(PixelMode::Rgb.bits_per_pixel(), 24);
        assert_eq!(PixelMode::Gray.bits_per_pixel(), 8);
        assert_eq!(PixelMode::Bilevel.bits_per_pixel(), 1);

        assert_eq!(PixelMode::Rgb.row_stride(10), 30);
        assert_eq!(PixelMode::Gray.row_stride(10), 10);
        // 10 bits round up to 2 bytes
        assert_eq!(PixelMode::Bilevel.row_stride(10), 2);
        assert_eq!(PixelMode::Bilevel.row_stride(8), 1);
    }

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new(100, 200, PixelMode::Gray).unwrap();
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 200);
        assert_eq!(raster.mode(), PixelMode::Gray);
        assert_eq!(raster.resolution(), 0);
        assert_eq!(raster.data().len(), 100 * 200);
    }

    #[test]
    fn test_raster_creation_invalid() {
        assert!(Raster::new(0, 100, PixelMode::Gray).is_err());
        assert!(Raster::new(100, 0, PixelMode::Rgb).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        let ok = Raster::from_raw(4, 2, PixelMode::Rgb, vec![0u8; 24]);
        assert!(ok.is_ok());

        let err = Raster::from_raw(4, 2, PixelMode::Rgb, vec![0u8; 23]);
        assert!(matches!(
            err,
            Err(Error::InvalidDataLength {
                expected: 24,
                actual: 23
            })
        ));
    }

    #[test]
    fn test_rgb_access() {
        let mut raster = Raster::new(4, 4, PixelMode::Rgb).unwrap();
        raster.set_rgb(2, 3, 10, 20, 30);
        assert_eq!(raster.rgb_at(2, 3), (10, 20, 30));
        assert_eq!(raster.rgb_at(0, 0), (0, 0, 0));
    }

    #[test]
    fn test_gray_access() {
        let mut raster = Raster::new(4, 4, PixelMode::Gray).unwrap();
        raster.set_gray(1, 1, 200);
        assert_eq!(raster.gray_at(1, 1), 200);
    }

    #[test]
    fn test_bit_access() {
        let mut raster = Raster::new(10, 2, PixelMode::Bilevel).unwrap();
        assert!(!raster.bit_at(9, 1));
        raster.set_bit(9, 1, true);
        assert!(raster.bit_at(9, 1));
        raster.set_bit(9, 1, false);
        assert!(!raster.bit_at(9, 1));
        // Neighbors in the same byte are untouched
        raster.set_bit(8, 1, true);
        assert!(!raster.bit_at(9, 1));
    }

    #[test]
    #[should_panic]
    fn test_mode_mismatch_panics() {
        let raster = Raster::new(4, 4, PixelMode::Gray).unwrap();
        let _ = raster.rgb_at(0, 0);
    }

    #[test]
    fn test_resolution() {
        let mut raster = Raster::new(4, 4, PixelMode::Gray).unwrap();
        raster.set_resolution(300);
        assert_eq!(raster.resolution(), 300);
    }

    #[test]
    fn test_sizes_equal() {
        let a = Raster::new(10, 20, PixelMode::Gray).unwrap();
        let b = Raster::new(10, 20, PixelMode::Gray).unwrap();
        let c = Raster::new(10, 20, PixelMode::Rgb).unwrap();
        assert!(a.sizes_equal(&b));
        assert!(!a.sizes_equal(&c));
    }
}

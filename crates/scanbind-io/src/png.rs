//! PNG image format support
//!
//! Reads PNG images using the `png` crate. Decoding normalizes every
//! source to 8-bit channels (palette expansion, 16-bit stripping), so
//! the resulting raster is either Gray or Rgb; alpha channels are
//! dropped (scanned pages are opaque).

use crate::{IoError, IoResult};
use png::{ColorType, Decoder, Transformations};
use scanbind_core::{PixelMode, Raster};
use std::io::{BufRead, Seek};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let data = &buf[..output_info.buffer_size()];

    let raster = match output_info.color_type {
        ColorType::Grayscale => Raster::from_raw(width, height, PixelMode::Gray, data.to_vec())?,
        ColorType::GrayscaleAlpha => {
            let gray: Vec<u8> = data.chunks_exact(2).map(|px| px[0]).collect();
            Raster::from_raw(width, height, PixelMode::Gray, gray)?
        }
        ColorType::Rgb => Raster::from_raw(width, height, PixelMode::Rgb, data.to_vec())?,
        ColorType::Rgba => {
            let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
            for px in data.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
            }
            Raster::from_raw(width, height, PixelMode::Rgb, rgb)?
        }
        // Palettes are expanded by the normalize transformation
        ColorType::Indexed => {
            return Err(IoError::DecodeError(
                "indexed PNG not expanded by decoder".to_string(),
            ));
        }
    };

    Ok(raster)
}

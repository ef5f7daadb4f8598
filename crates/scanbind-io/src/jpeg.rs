//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Supports 8-bit
//! grayscale and 24-bit RGB sources; CMYK and 16-bit luma JPEGs are
//! rejected as unsupported.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use scanbind_core::{PixelMode, Raster};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
///
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG frame info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let raster = match info.pixel_format {
        PixelFormat::L8 => Raster::from_raw(width, height, PixelMode::Gray, data)?,
        PixelFormat::RGB24 => Raster::from_raw(width, height, PixelMode::Rgb, data)?,
        PixelFormat::L16 => {
            return Err(IoError::UnsupportedFormat(
                "16-bit grayscale JPEG".to_string(),
            ));
        }
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat("CMYK JPEG".to_string()));
        }
    };

    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_garbage_fails() {
        let err = read_jpeg(Cursor::new(vec![0u8; 64]));
        assert!(err.is_err());
    }
}

//! JPEG image format support
//!
//! Reads baseline and progressive JPEG pages using the `jpeg-decoder`
//! crate. Grayscale, RGB and CMYK sources are all expanded to opaque RGB.
//! JPEG is lossy and has no alpha, so pages are never written back as JPEG.

use crate::{IoError, IoResult, pack_samples};
use inkline_core::{Pix, color};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let data = match info.pixel_format {
        PixelFormat::L8 => pack_samples(&pixels, width, height, 1, width as usize)?,
        PixelFormat::RGB24 => pack_samples(&pixels, width, height, 3, width as usize * 3)?,
        PixelFormat::CMYK32 => cmyk_to_rgb(&pixels, width, height)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(Pix::from_data(width, height, data)?)
}

fn cmyk_to_rgb(pixels: &[u8], width: u32, height: u32) -> IoResult<Vec<u32>> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            pixels.len(),
            expected
        )));
    }
    Ok(pixels[..expected]
        .chunks_exact(4)
        .map(|cmyk| {
            let k = 255 - cmyk[3] as u32;
            let channel = |v: u8| ((255 - v as u32) * k / 255) as u8;
            color::compose_rgb(channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2]))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmyk_conversion() {
        let data = cmyk_to_rgb(&[0, 0, 0, 0, 0, 0, 0, 255, 0, 255, 255, 0], 3, 1).unwrap();
        assert_eq!(data[0], color::WHITE);
        assert_eq!(data[1], color::BLACK);
        assert_eq!(data[2], color::compose_rgb(255, 0, 0));
    }

    #[test]
    fn test_read_garbage_fails() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x01, 0x02];
        assert!(read_jpeg(&data[..]).is_err());
    }
}

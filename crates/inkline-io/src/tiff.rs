//! TIFF image format support
//!
//! Reads the first page of a TIFF file. Bilevel, 8/16-bit gray and RGB(A)
//! pages are expanded to RGBA; other layouts are rejected.

use crate::{IoError, IoResult, pack_samples};
use inkline_core::{Pix, color};
use std::io::{Read, Seek};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// PhotometricInterpretation value for "0 is white"
const WHITE_IS_ZERO: u32 = 0;

/// Read a TIFF image (first page)
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    let white_is_zero = decoder
        .get_tag_u32(Tag::PhotometricInterpretation)
        .is_ok_and(|v| v == WHITE_IS_ZERO);

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let data = match (color_type, image_data) {
        (ColorType::Gray(1), DecodingResult::U8(bytes)) => {
            unpack_bilevel(&bytes, width, height, white_is_zero)?
        }
        (ColorType::Gray(8), DecodingResult::U8(mut bytes)) => {
            if white_is_zero {
                bytes.iter_mut().for_each(|v| *v = 255 - *v);
            }
            pack_samples(&bytes, width, height, 1, width as usize)?
        }
        (ColorType::GrayA(8), DecodingResult::U8(bytes)) => {
            pack_samples(&bytes, width, height, 2, width as usize * 2)?
        }
        (ColorType::RGB(8), DecodingResult::U8(bytes)) => {
            pack_samples(&bytes, width, height, 3, width as usize * 3)?
        }
        (ColorType::RGBA(8), DecodingResult::U8(bytes)) => {
            pack_samples(&bytes, width, height, 4, width as usize * 4)?
        }
        (ColorType::Gray(16), DecodingResult::U16(words)) => {
            pack_samples(&high_bytes(&words), width, height, 1, width as usize)?
        }
        (ColorType::RGB(16), DecodingResult::U16(words)) => {
            pack_samples(&high_bytes(&words), width, height, 3, width as usize * 3)?
        }
        (ColorType::RGBA(16), DecodingResult::U16(words)) => {
            pack_samples(&high_bytes(&words), width, height, 4, width as usize * 4)?
        }
        (other, _) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                other
            )));
        }
    };

    let has_alpha = matches!(color_type, ColorType::GrayA(_) | ColorType::RGBA(_));
    let mut pix_mut = Pix::from_data(width, height, data)?
        .try_into_mut()
        .unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_spp(if has_alpha { 4 } else { 3 });
    Ok(pix_mut.into())
}

fn high_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().map(|w| (w >> 8) as u8).collect()
}

/// Expand packed 1-bit rows (MSB first) to black/white pixels.
fn unpack_bilevel(bytes: &[u8], width: u32, height: u32, white_is_zero: bool) -> IoResult<Vec<u32>> {
    let stride = (width as usize).div_ceil(8);
    if bytes.len() < stride * height as usize {
        return Err(IoError::InvalidData(format!(
            "TIFF data too short: {} < {}",
            bytes.len(),
            stride * height as usize
        )));
    }

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for row in bytes.chunks_exact(stride).take(height as usize) {
        for x in 0..width as usize {
            let bit = (row[x / 8] >> (7 - (x % 8))) & 1 == 1;
            // BlackIsZero: a set bit is white
            let white = bit != white_is_zero;
            data.push(if white { color::WHITE } else { color::BLACK });
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_bilevel_polarity() {
        // 0b1010_0000: pixels 0 and 2 set
        let black_is_zero = unpack_bilevel(&[0b1010_0000], 3, 1, false).unwrap();
        assert_eq!(black_is_zero, vec![color::WHITE, color::BLACK, color::WHITE]);

        let white_is_zero = unpack_bilevel(&[0b1010_0000], 3, 1, true).unwrap();
        assert_eq!(white_is_zero, vec![color::BLACK, color::WHITE, color::BLACK]);
    }

    #[test]
    fn test_unpack_bilevel_short_data() {
        assert!(unpack_bilevel(&[0], 9, 1, false).is_err());
    }

    #[test]
    fn test_high_bytes() {
        assert_eq!(high_bytes(&[0xff00, 0x0100, 0x00ff]), vec![0xff, 0x01, 0x00]);
    }
}

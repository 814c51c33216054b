//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files (1, 4, 8 bit palettised and
//! 24/32 bit direct color) into RGBA page buffers and writes pages as
//! 24-bit bottom-up bitmaps.

use crate::{IoError, IoResult};
use inkline_core::{Pix, color};
use std::io::{self, Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Uncompressed pixel data
const BI_RGB: u32 = 0;

/// Uncompressed pixel data with channel masks
const BI_BITFIELDS: u32 = 3;

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count as u64), &mut io::sink())?;
    if skipped < count as u64 {
        return Err(IoError::InvalidData("truncated BMP header".to_string()));
    }
    Ok(())
}

/// Bytes per BMP row (rows are 4-byte aligned)
fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

/// Read exactly `len` bytes without trusting `len` for the allocation.
///
/// The buffer grows with the data actually present, so a header that
/// claims more pixels than the file holds fails before any page buffer
/// is allocated.
fn read_pixel_bytes<R: Read>(reader: &mut R, len: usize) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < len {
        return Err(IoError::InvalidData(format!(
            "truncated BMP pixel data: expected {} bytes, found {}",
            len,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_u32(&info_header, 4) as i32;
    let height = le_u32(&info_header, 8) as i32;
    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    if compression != BI_RGB && compression != BI_BITFIELDS {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    skip(&mut reader, header_size as usize - BMP_INFO_HEADER_SIZE as usize)?;
    let mut consumed = BMP_FILE_HEADER_SIZE + header_size as usize;

    // Palette entries are stored as B, G, R, reserved
    let palette: Vec<u32> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        consumed += raw.len();
        raw.chunks_exact(4)
            .map(|bgr| color::compose_rgb(bgr[2], bgr[1], bgr[0]))
            .collect()
    } else {
        Vec::new()
    };

    if pixel_offset > consumed {
        skip(&mut reader, pixel_offset - consumed)?;
    }

    let stride = row_stride(width, bits_per_pixel);
    let pixels = stride
        .checked_mul(height as usize)
        .ok_or_else(|| IoError::InvalidData(format!("BMP too large: {}x{}", width, height)))
        .and_then(|len| read_pixel_bytes(&mut reader, len))?;

    let mut pix_mut = Pix::new(width, height)?.to_mut();
    let with_alpha = bits_per_pixel == 32 && compression == BI_BITFIELDS;
    pix_mut.set_spp(if with_alpha { 4 } else { 3 });

    let lookup = |index: u8| -> IoResult<u32> {
        palette.get(index as usize).copied().ok_or_else(|| {
            IoError::InvalidData(format!("palette index {} out of range", index))
        })
    };

    for (row, row_buffer) in (0..height).zip(pixels.chunks_exact(stride)) {
        let y = if top_down { row } else { height - 1 - row };
        let out = pix_mut.row_data_mut(y);

        for (x, slot) in out.iter_mut().enumerate() {
            *slot = match bits_per_pixel {
                1 => lookup((row_buffer[x / 8] >> (7 - (x % 8))) & 1)?,
                4 => {
                    let byte = row_buffer[x / 2];
                    lookup(if x % 2 == 0 { byte >> 4 } else { byte & 0xF })?
                }
                8 => lookup(row_buffer[x])?,
                24 => {
                    let idx = x * 3;
                    color::compose_rgb(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
                }
                _ => {
                    let idx = x * 4;
                    let (b, g, r) = (row_buffer[idx], row_buffer[idx + 1], row_buffer[idx + 2]);
                    if with_alpha {
                        color::compose_rgba(r, g, b, row_buffer[idx + 3])
                    } else {
                        color::compose_rgb(r, g, b)
                    }
                }
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write a BMP image
///
/// Pages are always written as opaque 24-bit RGB; alpha is dropped.
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let stride = row_stride(width, 24);
    let pixel_data_size = stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    let file_size = pixel_offset + pixel_data_size;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&(file_size as u32).to_le_bytes())?;
    writer.write_all(&[0u8; 4])?;
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&24u16.to_le_bytes())?;
    writer.write_all(&BI_RGB.to_le_bytes())?;
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    let mut row_buffer = vec![0u8; stride];
    for row in 0..height {
        let y = height - 1 - row;
        for (x, &pixel) in pix.row_data(y).iter().enumerate() {
            let (r, g, b) = color::extract_rgb(pixel);
            row_buffer[x * 3..x * 3 + 3].copy_from_slice(&[b, g, r]);
        }
        writer.write_all(&row_buffer)?;
    }

    Ok(())
}

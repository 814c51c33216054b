//! inkline IO - Page image input/output
//!
//! Decodes scanned pages into RGBA [`Pix`] buffers and encodes extracted
//! lines back to disk.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | BMP    | yes  | yes   | `bmp` |
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | no    | `jpeg` |
//! | TIFF   | yes  | no    | `tiff-format` |

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{
    SUPPORTED_EXTENSIONS, detect_format, detect_format_from_bytes, is_supported_extension,
};
pub use inkline_core::ImageFormat;

use inkline_core::{Pix, color};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = fs::read(path.as_ref())?;
    read_image_mem(&data)
}

/// Read an image from memory
///
/// The format is detected from the leading magic bytes, never from a
/// file name. The returned page records its source format.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;

    let pix = match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(Cursor::new(data))?,
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data))?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data))?,
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(Cursor::new(data))?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "reading {:?} is not enabled",
                format
            )));
        }
    };

    log::trace!(
        "decoded {:?} page {}x{} (spp {})",
        format,
        pix.width(),
        pix.height(),
        pix.spp()
    );

    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_informat(format);
    Ok(pix_mut.into())
}

/// Write an image to a file path
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Write an image to memory
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        _ => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            format
        ))),
    }
}

/// Pack interleaved 8-bit samples into RGBA words.
///
/// `channels` selects the layout: 1 = gray, 2 = gray + alpha, 3 = RGB,
/// 4 = RGBA. Layouts without alpha become opaque. `stride` is the number
/// of bytes per source row.
#[allow(dead_code)]
pub(crate) fn pack_samples(
    bytes: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    stride: usize,
) -> IoResult<Vec<u32>> {
    let row_bytes = width as usize * channels;
    let needed = stride * (height as usize).saturating_sub(1) + row_bytes;
    if stride < row_bytes || bytes.len() < needed {
        return Err(IoError::InvalidData(format!(
            "expected {} rows of {} bytes, got {} bytes",
            height,
            row_bytes,
            bytes.len()
        )));
    }

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &bytes[y * stride..y * stride + row_bytes];
        data.extend(row.chunks_exact(channels).map(|s| match channels {
            1 => color::compose_rgb(s[0], s[0], s[0]),
            2 => color::compose_rgba(s[0], s[0], s[0], s[1]),
            3 => color::compose_rgb(s[0], s[1], s[2]),
            _ => color::compose_rgba(s[0], s[1], s[2], s[3]),
        }));
    }
    Ok(data)
}

//! PNG image format support
//!
//! Every PNG variant is normalized by the decoder to 8-bit gray, gray+alpha,
//! RGB or RGBA before being packed into a page buffer. Pages are written as
//! RGBA when the buffer carries alpha (`spp == 4`), else as RGB.

use crate::{IoError, IoResult, pack_samples};
use inkline_core::{Pix, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let data = pack_samples(
        &buf[..output_info.buffer_size()],
        width,
        height,
        channels,
        output_info.line_size,
    )?;
    let pix = Pix::from_data(width, height, data)?;
    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_spp(if channels % 2 == 0 { 4 } else { 3 });
    Ok(pix_mut.into())
}

/// Write a PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let with_alpha = pix.spp() == 4;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(if with_alpha {
        ColorType::Rgba
    } else {
        ColorType::Rgb
    });
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let samples = if with_alpha { 4 } else { 3 };
    let mut data = Vec::with_capacity(pix.data().len() * samples);
    for &pixel in pix.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b]);
        if with_alpha {
            data.push(a);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = Pix::new_filled(5, 5, color::WHITE).unwrap().to_mut();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 3);
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
        assert_eq!(pix2.get_pixel(4, 4), Some(color::WHITE));
    }

    #[test]
    fn test_png_keeps_transparency() {
        let mut pix_mut = Pix::new(4, 2).unwrap().to_mut();
        pix_mut.set_spp(4);
        pix_mut.set_pixel(1, 1, color::BLACK).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 4);
        assert_eq!(pix2.get_pixel(0, 0), Some(color::TRANSPARENT));
        assert_eq!(pix2.get_pixel(1, 1), Some(color::BLACK));
    }

    #[test]
    fn test_png_reads_grayscale() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 3, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 128, 255]).unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some((128, 128, 128)));
        assert_eq!(pix.get_pixel(2, 0), Some(color::WHITE));
    }
}

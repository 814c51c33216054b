//! inkline Core - Basic data structures for line segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the inkline toolkit:
//!
//! - [`Pix`] / [`PixMut`] - The RGBA page buffer (immutable / mutable)
//! - [`Box`] - Rectangle regions used for crops
//! - [`Settings`] / [`HueRange`] - Per-run processing configuration
//! - [`color`] - Pixel packing and color-space helpers

pub mod box_;
pub mod error;
pub mod pix;
pub mod settings;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut};
pub use settings::{HueRange, Settings};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Opaque black.
    pub const BLACK: u32 = 0x0000_00ff;
    /// Opaque white.
    pub const WHITE: u32 = 0xffff_ffff;
    /// Fully transparent (all channels zero).
    pub const TRANSPARENT: u32 = 0x0000_0000;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Gray level of a pixel: the truncated mean of R, G and B.
    ///
    /// Alpha is ignored.
    #[inline]
    pub fn gray_average(pixel: u32) -> u8 {
        let (r, g, b) = extract_rgb(pixel);
        ((r as u32 + g as u32 + b as u32) / 3) as u8
    }

    /// HSL color values, all channels normalized.
    ///
    /// Ranges: hue [0.0, 360.0) degrees, saturation [0.0, 1.0],
    /// brightness [0.0, 1.0]. Brightness is the HSL lightness,
    /// `(max + min) / 2`.
    ///
    /// Achromatic pixels (r == g == b) report hue 0 and saturation 0.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Hsl {
        pub hue: f32,
        pub saturation: f32,
        pub brightness: f32,
    }

    /// Convert RGB to HSL.
    pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
        let rf = r as f32 / 255.0;
        let gf = g as f32 / 255.0;
        let bf = b as f32 / 255.0;

        let max = rf.max(gf).max(bf);
        let min = rf.min(gf).min(bf);
        let brightness = (max + min) / 2.0;

        if r == g && g == b {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                brightness,
            };
        }

        let delta = max - min;
        let saturation = if brightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        // Compare on the integer channels so ties resolve exactly
        let max_i = r.max(g).max(b);
        let sector = if r == max_i {
            (gf - bf) / delta
        } else if g == max_i {
            2.0 + (bf - rf) / delta
        } else {
            4.0 + (rf - gf) / delta
        };

        let mut hue = sector * 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        if hue >= 360.0 {
            hue -= 360.0;
        }

        Hsl {
            hue,
            saturation,
            brightness,
        }
    }

    /// Convert a packed pixel to HSL.
    #[inline]
    pub fn pixel_to_hsl(pixel: u32) -> Hsl {
        let (r, g, b) = extract_rgb(pixel);
        rgb_to_hsl(r, g, b)
    }

}

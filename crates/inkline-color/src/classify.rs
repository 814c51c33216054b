//! Ink classification
//!
//! Decides, one pixel at a time, whether a page pixel is ink and how it
//! should be drawn in an extracted line. Two independent tests make a
//! pixel ink:
//!
//! - **Dark ink**: the gray level `(r + g + b) / 3` is below
//!   `Settings::ink_threshold`.
//! - **Colored ink**: saturation above `min_saturation`, brightness below
//!   `max_brightness`, and the hue inside any of `ink_hue_ranges`.
//!
//! All functions here are pure and only read the settings.

use inkline_core::Settings;
use inkline_core::color::{self, Hsl};

/// Coarse ink color category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InkType {
    /// Not ink
    None,
    /// Dark (gray-level) ink
    Black,
    /// Hue in [0, 30] or [330, 360)
    Red,
    /// Hue in (30, 90]
    Yellow,
    /// Hue in (90, 150]
    Green,
    /// Hue in (150, 270]
    Blue,
    /// Hue in (270, 330)
    Purple,
}

impl InkType {
    /// Bucket a hue (degrees) into one of the five colored ink bands.
    pub fn from_hue(hue: f32) -> Self {
        if hue <= 30.0 || hue >= 330.0 {
            Self::Red
        } else if hue <= 90.0 {
            Self::Yellow
        } else if hue <= 150.0 {
            Self::Green
        } else if hue <= 270.0 {
            Self::Blue
        } else {
            Self::Purple
        }
    }
}

#[inline]
fn is_dark(pixel: u32, settings: &Settings) -> bool {
    color::gray_average(pixel) < settings.ink_threshold
}

#[inline]
fn passes_color_gate(hsl: &Hsl, settings: &Settings) -> bool {
    hsl.saturation > settings.min_saturation && hsl.brightness < settings.max_brightness
}

/// Check whether a pixel is ink.
pub fn is_ink(pixel: u32, settings: &Settings) -> bool {
    if is_dark(pixel, settings) {
        return true;
    }

    let hsl = color::pixel_to_hsl(pixel);
    passes_color_gate(&hsl, settings)
        && settings
            .ink_hue_ranges
            .iter()
            .any(|range| range.contains(hsl.hue))
}

/// Classify the kind of ink a pixel carries.
///
/// Dark ink wins over color. Colored classification ignores the configured
/// hue ranges and uses the fixed bands of [`InkType::from_hue`].
pub fn classify_ink_type(pixel: u32, settings: &Settings) -> InkType {
    if is_dark(pixel, settings) {
        return InkType::Black;
    }

    let hsl = color::pixel_to_hsl(pixel);
    if passes_color_gate(&hsl, settings) {
        InkType::from_hue(hsl.hue)
    } else {
        InkType::None
    }
}

/// Output pixel for one source pixel.
///
/// | source  | setting                        | result            |
/// |---------|--------------------------------|-------------------|
/// | ink     | `preserve_original_colors`     | source pixel      |
/// | ink     | otherwise                      | opaque black      |
/// | not ink | `save_transparent`             | transparent (a=0) |
/// | not ink | otherwise                      | opaque white      |
///
/// A zero alpha in the result means the pixel should not be written.
pub fn render_pixel(pixel: u32, settings: &Settings) -> u32 {
    if is_ink(pixel, settings) {
        if settings.preserve_original_colors {
            pixel
        } else {
            color::BLACK
        }
    } else if settings.save_transparent {
        color::TRANSPARENT
    } else {
        color::WHITE
    }
}

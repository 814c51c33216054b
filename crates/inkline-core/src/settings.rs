//! Processing settings
//!
//! One [`Settings`] value configures a whole page run. It is built once
//! (defaults plus `with_*` setters), validated, and then only read by the
//! pipeline stages. Callers that reuse a template across pages clone it
//! before applying per-page overrides.

use crate::error::{Error, Result};

/// Largest accepted majority-filter radius.
pub const MAX_NOISE_RADIUS: u32 = 10;

/// A band of hue degrees treated as ink-colored.
///
/// When `min_hue > max_hue` the band wraps through 360 degrees, so
/// `HueRange::new(350.0, 10.0)` covers reds on both sides of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    /// Lower hue bound in degrees, inclusive
    pub min_hue: f32,
    /// Upper hue bound in degrees, inclusive
    pub max_hue: f32,
}

impl HueRange {
    /// Create a hue range.
    pub const fn new(min_hue: f32, max_hue: f32) -> Self {
        Self { min_hue, max_hue }
    }

    /// Whether the range spans the 360 degree boundary.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.min_hue > self.max_hue
    }

    /// Check if a hue (degrees) falls inside the range.
    #[inline]
    pub fn contains(&self, hue: f32) -> bool {
        if self.wraps() {
            hue >= self.min_hue || hue <= self.max_hue
        } else {
            hue >= self.min_hue && hue <= self.max_hue
        }
    }

    /// Whether both bounds lie in [0, 360).
    pub fn is_valid(&self) -> bool {
        let in_degrees = |h: f32| (0.0..360.0).contains(&h);
        in_degrees(self.min_hue) && in_degrees(self.max_hue)
    }
}

/// Configuration for one segmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Gray level below which a pixel is dark ink (default: 200)
    pub ink_threshold: u8,

    /// Replace `ink_threshold` with an Otsu threshold per page (default: true)
    pub use_automatic_threshold: bool,

    /// Line groups shorter than this many rows are dropped (default: 15)
    pub min_line_height: u32,

    /// Empty rows tolerated between components of the same line (default: 3)
    pub max_empty_rows: u32,

    /// Run the majority filter after binarization (default: false)
    pub remove_noise: bool,

    /// Majority filter radius, 1..=10 (default: 3)
    pub noise_radius: u32,

    /// Render background as transparent instead of white (default: false)
    pub save_transparent: bool,

    /// Keep ink pixels in their source color instead of black (default: false)
    pub preserve_original_colors: bool,

    /// Colored ink must be more saturated than this (default: 0.2)
    pub min_saturation: f32,

    /// Colored ink must be darker than this (default: 0.8)
    pub max_brightness: f32,

    /// Output width hint for callers that rescale; 0 = unconstrained
    pub target_width: u32,

    /// Output height hint for callers that rescale; 0 = unconstrained
    pub target_height: u32,

    /// Hue bands accepted as colored ink
    pub ink_hue_ranges: Vec<HueRange>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ink_threshold: 200,
            use_automatic_threshold: true,
            min_line_height: 15,
            max_empty_rows: 3,
            remove_noise: false,
            noise_radius: 3,
            save_transparent: false,
            preserve_original_colors: false,
            min_saturation: 0.2,
            max_brightness: 0.8,
            target_width: 0,
            target_height: 0,
            ink_hue_ranges: vec![
                // Red
                HueRange::new(0.0, 10.0),
                // Cyan
                HueRange::new(170.0, 180.0),
                // Green
                HueRange::new(80.0, 100.0),
                // Blue
                HueRange::new(220.0, 240.0),
            ],
        }
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed ink threshold
    pub fn with_ink_threshold(mut self, threshold: u8) -> Self {
        self.ink_threshold = threshold;
        self
    }

    /// Enable or disable the automatic (Otsu) threshold
    pub fn with_automatic_threshold(mut self, enabled: bool) -> Self {
        self.use_automatic_threshold = enabled;
        self
    }

    /// Set the minimum line height
    pub fn with_min_line_height(mut self, height: u32) -> Self {
        self.min_line_height = height;
        self
    }

    /// Set the vertical gap tolerance
    pub fn with_max_empty_rows(mut self, rows: u32) -> Self {
        self.max_empty_rows = rows;
        self
    }

    /// Enable or disable noise removal
    pub fn with_remove_noise(mut self, enabled: bool) -> Self {
        self.remove_noise = enabled;
        self
    }

    /// Set the majority filter radius
    pub fn with_noise_radius(mut self, radius: u32) -> Self {
        self.noise_radius = radius;
        self
    }

    /// Render background as transparent
    pub fn with_save_transparent(mut self, enabled: bool) -> Self {
        self.save_transparent = enabled;
        self
    }

    /// Keep original ink colors
    pub fn with_preserve_original_colors(mut self, enabled: bool) -> Self {
        self.preserve_original_colors = enabled;
        self
    }

    /// Set the saturation gate for colored ink
    pub fn with_min_saturation(mut self, saturation: f32) -> Self {
        self.min_saturation = saturation;
        self
    }

    /// Set the brightness gate for colored ink
    pub fn with_max_brightness(mut self, brightness: f32) -> Self {
        self.max_brightness = brightness;
        self
    }

    /// Set the output size hint
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Replace the colored-ink hue ranges
    pub fn with_hue_ranges(mut self, ranges: Vec<HueRange>) -> Self {
        self.ink_hue_ranges = ranges;
        self
    }

    /// Append one colored-ink hue range
    pub fn add_hue_range(mut self, min_hue: f32, max_hue: f32) -> Self {
        self.ink_hue_ranges.push(HueRange::new(min_hue, max_hue));
        self
    }

    /// Validate settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.min_line_height == 0 {
            return Err(Error::InvalidParameter(
                "min_line_height must be positive".to_string(),
            ));
        }
        if self.noise_radius == 0 || self.noise_radius > MAX_NOISE_RADIUS {
            return Err(Error::InvalidParameter(format!(
                "noise_radius must be between 1 and {}, got {}",
                MAX_NOISE_RADIUS, self.noise_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.min_saturation) {
            return Err(Error::InvalidParameter(format!(
                "min_saturation must be in [0, 1], got {}",
                self.min_saturation
            )));
        }
        if !(0.0..=1.0).contains(&self.max_brightness) {
            return Err(Error::InvalidParameter(format!(
                "max_brightness must be in [0, 1], got {}",
                self.max_brightness
            )));
        }
        if let Some(range) = self.ink_hue_ranges.iter().find(|r| !r.is_valid()) {
            return Err(Error::InvalidParameter(format!(
                "hue range {}..{} must lie in [0, 360)",
                range.min_hue, range.max_hue
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.ink_threshold, 200);
        assert!(s.use_automatic_threshold);
        assert_eq!(s.min_line_height, 15);
        assert_eq!(s.max_empty_rows, 3);
        assert_eq!(s.noise_radius, 3);
        assert_eq!(s.ink_hue_ranges.len(), 4);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let s = Settings::new()
            .with_ink_threshold(120)
            .with_automatic_threshold(false)
            .with_save_transparent(true)
            .with_hue_ranges(Vec::new())
            .add_hue_range(350.0, 10.0);
        assert_eq!(s.ink_threshold, 120);
        assert!(!s.use_automatic_threshold);
        assert!(s.save_transparent);
        assert_eq!(s.ink_hue_ranges, vec![HueRange::new(350.0, 10.0)]);
    }

    #[test]
    fn test_clone_is_independent() {
        let template = Settings::default();
        let mut page = template.clone();
        page.ink_hue_ranges.clear();
        page.preserve_original_colors = true;
        assert_eq!(template.ink_hue_ranges.len(), 4);
        assert!(!template.preserve_original_colors);
    }

    #[test]
    fn test_validate_rejects() {
        assert!(Settings::new().with_min_line_height(0).validate().is_err());
        assert!(Settings::new().with_noise_radius(0).validate().is_err());
        assert!(Settings::new().with_noise_radius(11).validate().is_err());
        assert!(Settings::new().with_min_saturation(1.5).validate().is_err());
        assert!(Settings::new().with_max_brightness(f32::NAN).validate().is_err());
        assert!(Settings::new().add_hue_range(0.0, 360.0).validate().is_err());
        assert!(Settings::new().with_noise_radius(10).validate().is_ok());
    }

    #[test]
    fn test_hue_range_wrap() {
        let plain = HueRange::new(80.0, 100.0);
        assert!(plain.contains(80.0));
        assert!(plain.contains(100.0));
        assert!(!plain.contains(100.5));

        let wrap = HueRange::new(350.0, 10.0);
        assert!(wrap.wraps());
        assert!(wrap.contains(355.0));
        assert!(wrap.contains(0.0));
        assert!(wrap.contains(10.0));
        assert!(!wrap.contains(180.0));
    }
}

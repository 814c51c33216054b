use clap::Args;
use inkline_core::{HueRange, Settings};

/// Processing settings, one flag per field
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Gray level below which a pixel is ink (used with --manual-threshold
    /// or --direct)
    #[arg(long, default_value_t = 200)]
    pub ink_threshold: u8,

    /// Use --ink-threshold instead of the automatic Otsu threshold
    #[arg(long)]
    pub manual_threshold: bool,

    /// Lines shorter than this many rows are dropped
    #[arg(long, default_value_t = 15)]
    pub min_line_height: u32,

    /// Empty rows allowed inside one line
    #[arg(long, default_value_t = 3)]
    pub max_empty_rows: u32,

    /// Run the majority filter after binarization
    #[arg(long)]
    pub remove_noise: bool,

    /// Majority filter radius (1 to 10)
    #[arg(long, default_value_t = 3)]
    pub noise_radius: u32,

    /// Write lines on a transparent background
    #[arg(long)]
    pub transparent: bool,

    /// Keep the source color of ink pixels
    #[arg(long)]
    pub preserve_colors: bool,

    /// Colored ink must be more saturated than this
    #[arg(long, default_value_t = 0.2)]
    pub min_saturation: f32,

    /// Colored ink must be darker than this
    #[arg(long, default_value_t = 0.8)]
    pub max_brightness: f32,

    /// Hue range of colored ink as MIN:MAX degrees, can be repeated.
    /// Ranges with MIN > MAX wrap through 0.
    #[arg(long = "hue-range", value_name = "MIN:MAX", value_parser = parse_hue_range)]
    pub hue_ranges: Vec<HueRange>,
}

impl SettingsArgs {
    /// Build the run settings. Without any --hue-range the default ranges
    /// are kept.
    pub fn to_settings(&self) -> Settings {
        let settings = Settings::new()
            .with_ink_threshold(self.ink_threshold)
            .with_automatic_threshold(!self.manual_threshold)
            .with_min_line_height(self.min_line_height)
            .with_max_empty_rows(self.max_empty_rows)
            .with_remove_noise(self.remove_noise)
            .with_noise_radius(self.noise_radius)
            .with_save_transparent(self.transparent)
            .with_preserve_original_colors(self.preserve_colors)
            .with_min_saturation(self.min_saturation)
            .with_max_brightness(self.max_brightness);

        if self.hue_ranges.is_empty() {
            settings
        } else {
            settings.with_hue_ranges(self.hue_ranges.clone())
        }
    }
}

/// Parse `MIN:MAX` into a hue range.
pub fn parse_hue_range(s: &str) -> Result<HueRange, String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad hue {v:?}: {e}"))
    };
    let range = HueRange::new(parse(min)?, parse(max)?);
    if range.is_valid() {
        Ok(range)
    } else {
        Err(format!("hues must be in [0, 360), got {s:?}"))
    }
}

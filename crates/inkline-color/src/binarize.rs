//! Binarization
//!
//! Turns a page into an opaque black/white image using the ink
//! classifier. In automatic mode the Otsu threshold of the page replaces
//! `ink_threshold` for this one call; the caller's settings are untouched.

use crate::ColorResult;
use crate::classify::is_ink;
use crate::threshold::compute_otsu_threshold;
use inkline_core::{Pix, Settings, color};

/// Gray-level threshold used for the dark-ink test on this page.
///
/// In automatic mode this is the Otsu cut point plus one (saturating), so
/// that every gray level in Otsu's dark class `0..=t` satisfies
/// `gray < threshold`. Otherwise it is `settings.ink_threshold`.
pub fn effective_threshold(pix: &Pix, settings: &Settings) -> u8 {
    if settings.use_automatic_threshold {
        let otsu = compute_otsu_threshold(pix);
        let threshold = otsu.saturating_add(1);
        log::debug!("automatic threshold: otsu {} -> ink below {}", otsu, threshold);
        threshold
    } else {
        settings.ink_threshold
    }
}

/// Per-call copy of `settings` with the threshold fixed for this page.
///
/// The copy has `use_automatic_threshold` cleared and the effective
/// threshold stored in `ink_threshold`.
pub fn resolve_settings(pix: &Pix, settings: &Settings) -> Settings {
    let mut resolved = settings.clone();
    resolved.ink_threshold = effective_threshold(pix, settings);
    resolved.use_automatic_threshold = false;
    resolved
}

/// Black where a pixel is ink under `settings` as given, white elsewhere.
///
/// No threshold resolution happens here; `ink_threshold` is used directly.
pub fn ink_mask(pix: &Pix, settings: &Settings) -> Pix {
    let mut out = pix.create_template().to_mut();
    out.set_spp(3);
    for (dst, &src) in out.data_mut().iter_mut().zip(pix.data()) {
        *dst = if is_ink(src, settings) {
            color::BLACK
        } else {
            color::WHITE
        };
    }
    out.into()
}

/// Binarize a page.
///
/// # Errors
///
/// Returns an error if `settings` fails validation.
pub fn binarize(pix: &Pix, settings: &Settings) -> ColorResult<Pix> {
    settings.validate()?;
    let resolved = resolve_settings(pix, settings);
    Ok(ink_mask(pix, &resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::color::compose_rgb;

    fn gradient_page() -> Pix {
        let mut pix = Pix::new(256, 1).unwrap().to_mut();
        for x in 0..256u32 {
            let g = x as u8;
            pix.set_pixel(x, 0, compose_rgb(g, g, g)).unwrap();
        }
        pix.into()
    }

    #[test]
    fn test_manual_threshold() {
        let settings = Settings::new()
            .with_automatic_threshold(false)
            .with_ink_threshold(100);
        let bin = binarize(&gradient_page(), &settings).unwrap();
        assert_eq!(bin.get_pixel(99, 0), Some(color::BLACK));
        assert_eq!(bin.get_pixel(100, 0), Some(color::WHITE));
        assert_eq!(bin.spp(), 3);
    }

    #[test]
    fn test_resolve_does_not_touch_caller() {
        let settings = Settings::new();
        let page = gradient_page();
        let resolved = resolve_settings(&page, &settings);
        assert!(settings.use_automatic_threshold);
        assert_eq!(settings.ink_threshold, 200);
        assert!(!resolved.use_automatic_threshold);
        assert_eq!(resolved.ink_threshold, compute_otsu_threshold(&page) + 1);
    }

    #[test]
    fn test_automatic_on_black_and_white() {
        let mut page = Pix::new_filled(4, 4, color::WHITE).unwrap().to_mut();
        page.set_pixel(1, 1, color::BLACK).unwrap();
        let page: Pix = page.into();

        let settings = Settings::new().with_hue_ranges(Vec::new());
        assert_eq!(effective_threshold(&page, &settings), 1);
        let bin = binarize(&page, &settings).unwrap();
        assert_eq!(bin.data(), page.data());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let page = gradient_page();
        assert!(binarize(&page, &Settings::new().with_noise_radius(0)).is_err());
    }
}

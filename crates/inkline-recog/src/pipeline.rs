//! Page entry points
//!
//! [`preprocess`] produces the cleaned black/white page: binarization
//! followed by the optional majority filter. [`process_page`] runs line
//! extraction on that cleaned page and reports what each stage found.

use crate::error::RecogResult;
use crate::extract::{ExtractedLine, segment_lines};
use inkline_color::{ink_mask, resolve_settings};
use inkline_core::{Pix, Settings};
use inkline_filter::majority_filter;

/// Outcome of [`process_page`]
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Ink threshold used for the page after automatic resolution
    pub threshold: u8,
    /// Ink components found on the binarized page
    pub component_count: usize,
    /// Line groups formed from those components
    pub group_count: usize,
    /// Extracted lines, in page order
    pub lines: Vec<ExtractedLine>,
}

fn binarize_resolved(pix: &Pix, resolved: &Settings) -> RecogResult<Pix> {
    let mask = ink_mask(pix, resolved);
    if resolved.remove_noise {
        Ok(majority_filter(&mask, resolved.noise_radius)?)
    } else {
        Ok(mask)
    }
}

/// Binarize a page and, when `settings.remove_noise` is set, clean it with
/// the majority filter.
///
/// # Errors
///
/// Returns an error if `settings` fails validation.
pub fn preprocess(pix: &Pix, settings: &Settings) -> RecogResult<Pix> {
    settings.validate()?;
    let resolved = resolve_settings(pix, settings);
    binarize_resolved(pix, &resolved)
}

/// Preprocess a page and extract its lines from the cleaned image.
///
/// Output lines are black on white (or black on transparent); source colors
/// do not survive binarization.
///
/// # Errors
///
/// Returns an error if `settings` fails validation.
pub fn process_page(pix: &Pix, settings: &Settings) -> RecogResult<PageResult> {
    settings.validate()?;
    let resolved = resolve_settings(pix, settings);
    let cleaned = binarize_resolved(pix, &resolved)?;

    let segmentation = segment_lines(&cleaned, &resolved)?;
    log::info!(
        "threshold {}: {} lines from {} components",
        resolved.ink_threshold,
        segmentation.lines.len(),
        segmentation.component_count
    );

    Ok(PageResult {
        threshold: resolved.ink_threshold,
        component_count: segmentation.component_count,
        group_count: segmentation.group_count,
        lines: segmentation.lines,
    })
}

/// File name for one line of a page: `{base}_line_{index:02}.{ext}`.
pub fn line_file_name(base: &str, index: usize, ext: &str) -> String {
    format!("{base}_line_{index:02}.{ext}")
}

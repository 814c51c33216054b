//! Line extraction
//!
//! Turns line groups into cropped line images. The crop is vertical from
//! the group extent and horizontal from a rescan of the band for ink
//! columns, widened by [`LINE_MARGIN`] pixels on each side. Output pixels
//! go through [`render_pixel`], so lines come out black-on-white,
//! color-preserving, or on a transparent background as configured.

use crate::error::{RecogError, RecogResult};
use crate::textline::{LineGroup, group_into_lines};
use inkline_color::{is_ink, render_pixel};
use inkline_core::{Box, Pix, Settings, color};
use inkline_region::{InkMap, find_components};

/// Columns of background kept on each side of the ink
pub const LINE_MARGIN: u32 = 5;

/// One cropped line of a page
#[derive(Debug, Clone)]
pub struct ExtractedLine {
    /// 1-based position of the line in page order
    pub index: usize,
    /// Crop rectangle in page coordinates (empty for the placeholder)
    pub bounds: Box,
    /// Rendered line image, always RGBA (`spp == 4`)
    pub pix: Pix,
}

impl ExtractedLine {
    /// Whether this is the 1x1 placeholder left by a failed line
    pub fn is_placeholder(&self) -> bool {
        self.bounds.is_empty() && self.pix.width() == 1 && self.pix.height() == 1
    }
}

/// Line images of a page plus the counts seen on the way
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Ink components found on the page
    pub component_count: usize,
    /// Line groups formed from those components
    pub group_count: usize,
    /// Lines kept, in page order
    pub lines: Vec<ExtractedLine>,
}

/// The 1x1 transparent image standing in for a line that failed to render.
pub fn empty_line() -> Pix {
    let mut pix = Pix::new_filled(1, 1, color::TRANSPARENT)
        .unwrap_or_else(|_| unreachable!("1x1 is a valid size"))
        .to_mut();
    pix.set_spp(4);
    pix.into()
}

/// Compute the crop rectangle of a line group.
///
/// # Errors
///
/// - [`RecogError::InvalidGeometry`] if the vertical extent collapses once
///   clamped to the page.
/// - [`RecogError::BelowMinimumHeight`] if the clamped height is below
///   `settings.min_line_height`.
pub fn line_bounds(source: &Pix, group: &LineGroup, settings: &Settings) -> RecogResult<Box> {
    let width = source.width();
    let top = group.top();
    let bottom = (group.bottom() as u64 + 1).min(source.height() as u64) as u32;

    if top >= bottom {
        return Err(RecogError::InvalidGeometry(format!(
            "rows {}..{} collapse on a page of height {}",
            top,
            bottom,
            source.height()
        )));
    }
    let height = bottom - top;
    if height < settings.min_line_height {
        return Err(RecogError::BelowMinimumHeight {
            height,
            min: settings.min_line_height,
        });
    }

    let mut ink_columns: Option<(u32, u32)> = None;
    for y in top..bottom {
        let row = source.row_data(y);
        let first = row.iter().position(|&p| is_ink(p, settings));
        let last = row.iter().rposition(|&p| is_ink(p, settings));
        if let (Some(first), Some(last)) = (first, last) {
            let (first, last) = (first as u32, last as u32);
            ink_columns = Some(match ink_columns {
                Some((left, right)) => (left.min(first), right.max(last)),
                None => (first, last),
            });
        }
    }

    let (left, right) = match ink_columns {
        Some((left, right)) => {
            let left = left.saturating_sub(LINE_MARGIN);
            let right = (right + LINE_MARGIN).min(width - 1);
            if left >= right { (0, width - 1) } else { (left, right) }
        }
        None => (0, width - 1),
    };

    Ok(Box::new_unchecked(
        left as i32,
        top as i32,
        (right - left + 1) as i32,
        height as i32,
    ))
}

/// Render the page region inside `bounds` into a new RGBA line image.
///
/// The image starts as transparent or opaque white per
/// `settings.save_transparent`; rendered pixels with zero alpha are not
/// written.
///
/// # Errors
///
/// Returns [`RecogError::InvalidGeometry`] if `bounds` is empty or not
/// fully inside the page.
pub fn render_line(source: &Pix, bounds: &Box, settings: &Settings) -> RecogResult<Pix> {
    if bounds.is_empty() || bounds.clip(source.width(), source.height()) != Some(*bounds) {
        return Err(RecogError::InvalidGeometry(format!(
            "crop {:?} is not inside the {}x{} page",
            bounds,
            source.width(),
            source.height()
        )));
    }

    let background = if settings.save_transparent {
        color::TRANSPARENT
    } else {
        color::WHITE
    };
    let mut out = Pix::new_filled(bounds.w as u32, bounds.h as u32, background)?.to_mut();
    out.set_spp(4);

    let left = bounds.x as usize;
    let right = bounds.right() as usize;
    for (dy, y) in (bounds.y..bounds.bottom()).enumerate() {
        let src = &source.row_data(y as u32)[left..right];
        let dst = out.row_data_mut(dy as u32);
        for (slot, &pixel) in dst.iter_mut().zip(src) {
            let rendered = render_pixel(pixel, settings);
            if color::alpha(rendered) != 0 {
                *slot = rendered;
            }
        }
    }

    Ok(out.into())
}

/// Crop and render one line group.
///
/// Rejections (collapsed or too-short groups) are returned as errors;
/// see [`extract_line_or_empty`] for the placeholder-returning variant.
pub fn extract_line(source: &Pix, group: &LineGroup, settings: &Settings) -> RecogResult<Pix> {
    let bounds = line_bounds(source, group, settings)?;
    render_line(source, &bounds, settings)
}

/// Crop and render one line group, or return [`empty_line`] on any failure.
pub fn extract_line_or_empty(source: &Pix, group: &LineGroup, settings: &Settings) -> Pix {
    extract_line(source, group, settings).unwrap_or_else(|e| {
        log::debug!("line rows {}..={} replaced: {}", group.top(), group.bottom(), e);
        empty_line()
    })
}

/// Keep, drop, or replace the result of one line.
fn settle_line(group: &LineGroup, result: RecogResult<(Box, Pix)>) -> Option<(Box, Pix)> {
    match result {
        Ok(line) => Some(line),
        Err(e) if e.is_rejection() => {
            log::debug!("dropped line rows {}..={}: {}", group.top(), group.bottom(), e);
            None
        }
        Err(e) => {
            log::warn!(
                "line rows {}..={} failed, substituting empty line: {}",
                group.top(),
                group.bottom(),
                e
            );
            Some((Box::default(), empty_line()))
        }
    }
}

/// Segment a page into line images, keeping the intermediate counts.
///
/// `settings.ink_threshold` is used as given; no automatic threshold is
/// computed here.
///
/// # Errors
///
/// Returns an error only if `settings` fails validation. Per-line
/// problems never abort the page.
pub fn segment_lines(source: &Pix, settings: &Settings) -> RecogResult<Segmentation> {
    settings.validate()?;

    let map = InkMap::from_pix(source, settings);
    let components = find_components(&map);
    let component_count = components.len();
    let groups = group_into_lines(components, settings);

    let lines: Vec<ExtractedLine> = groups
        .iter()
        .filter_map(|group| {
            let result = line_bounds(source, group, settings)
                .and_then(|bounds| Ok((bounds, render_line(source, &bounds, settings)?)));
            settle_line(group, result)
        })
        .enumerate()
        .map(|(i, (bounds, pix))| ExtractedLine {
            index: i + 1,
            bounds,
            pix,
        })
        .collect();

    log::debug!(
        "{} components, {} groups, {} lines",
        component_count,
        groups.len(),
        lines.len()
    );

    Ok(Segmentation {
        component_count,
        group_count: groups.len(),
        lines,
    })
}

/// Segment a page into line images.
///
/// # Errors
///
/// Returns an error only if `settings` fails validation.
pub fn extract_lines(source: &Pix, settings: &Settings) -> RecogResult<Vec<ExtractedLine>> {
    Ok(segment_lines(source, settings)?.lines)
}

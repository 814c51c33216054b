//! Single-page splitting

use crate::error::InklineResult;
use crate::output::{page_base_name, write_lines};
use inkline_core::Settings;
use inkline_io::read_image;
use inkline_recog::{extract_lines, process_page};
use std::path::{Path, PathBuf};

/// How a page is turned into lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Binarize (and optionally denoise) first; lines are black ink
    #[default]
    Cleaned,
    /// Extract from the source colors with the threshold as configured
    Direct,
}

/// What [`split_page`] produced
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Threshold used, when the page went through binarization
    pub threshold: Option<u8>,
    /// Written line files, in page order
    pub files: Vec<PathBuf>,
}

/// Split one page image into line files inside `out_dir`.
///
/// # Errors
///
/// Fails if the page cannot be decoded, `settings` is invalid, or a line
/// file cannot be written.
pub fn split_page(
    image: &Path,
    out_dir: &Path,
    settings: &Settings,
    mode: SplitMode,
) -> InklineResult<SplitReport> {
    let pix = read_image(image)?;
    log::info!(
        "{}: {}x{} {:?}",
        image.display(),
        pix.width(),
        pix.height(),
        pix.informat()
    );

    let (threshold, lines) = match mode {
        SplitMode::Cleaned => {
            let result = process_page(&pix, settings)?;
            (Some(result.threshold), result.lines)
        }
        SplitMode::Direct => (None, extract_lines(&pix, settings)?),
    };

    let files = write_lines(&lines, out_dir, &page_base_name(image))?;
    Ok(SplitReport { threshold, files })
}

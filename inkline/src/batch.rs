//! Directory batch processing
//!
//! Every supported image in the input directory is split with the same
//! settings, with source colors kept on a transparent background. Each
//! page gets its own output sub-directory named after the page. Pages run
//! in parallel; a page that fails is logged and skipped.

use crate::error::{InklineError, InklineResult};
use crate::output::{page_base_name, write_lines};
use inkline_core::Settings;
use inkline_io::{is_supported_extension, read_image};
use inkline_recog::extract_lines;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Totals of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Pages split and written
    pub pages: usize,
    /// Pages skipped because of an error
    pub failed: usize,
    /// Line files written
    pub lines: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} pages. Extracted {} lines in total.",
            self.pages, self.lines
        )
    }
}

/// Settings used for every page of a batch: the template with original
/// colors and transparency forced on.
pub fn batch_settings(template: &Settings) -> Settings {
    template
        .clone()
        .with_preserve_original_colors(true)
        .with_save_transparent(true)
}

/// Supported image files directly inside `dir`, sorted by file name.
pub fn collect_pages(dir: &Path) -> InklineResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(InklineError::fs(dir))?;
    let mut pages = Vec::new();
    for entry in entries {
        let path = entry.map_err(InklineError::fs(dir))?.path();
        if path.is_file() && is_supported_extension(&path) {
            pages.push(path);
        }
    }
    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pages)
}

fn split_one(page: &Path, output: &Path, settings: &Settings) -> InklineResult<usize> {
    let pix = read_image(page)?;
    let lines = extract_lines(&pix, settings)?;
    let base = page_base_name(page);
    let files = write_lines(&lines, &output.join(&base), &base)?;
    log::info!("{}: {} lines", page.display(), files.len());
    Ok(files.len())
}

/// Split every page of `input` into `output/{page}/{page}_line_NN.png`.
///
/// # Errors
///
/// Fails before any page work if `template` is invalid or `input` cannot
/// be listed. Errors on individual pages are logged and counted in
/// [`BatchSummary::failed`].
pub fn process_directory(
    input: &Path,
    output: &Path,
    template: &Settings,
) -> InklineResult<BatchSummary> {
    let settings = batch_settings(template);
    settings.validate()?;

    let pages = collect_pages(input)?;
    log::info!("Found {} pages in {}", pages.len(), input.display());
    fs::create_dir_all(output).map_err(InklineError::fs(output))?;

    let summary = pages
        .par_iter()
        .map(|page| match split_one(page, output, &settings) {
            Ok(lines) => BatchSummary {
                pages: 1,
                failed: 0,
                lines,
            },
            Err(e) => {
                log::error!("Skipping {}: {}", page.display(), e);
                BatchSummary {
                    pages: 0,
                    failed: 1,
                    lines: 0,
                }
            }
        })
        .reduce(BatchSummary::default, |a, b| BatchSummary {
            pages: a.pages + b.pages,
            failed: a.failed + b.failed,
            lines: a.lines + b.lines,
        });

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_settings_forces_color_output() {
        let template = Settings::new().with_min_line_height(20);
        let settings = batch_settings(&template);
        assert!(settings.preserve_original_colors);
        assert!(settings.save_transparent);
        assert_eq!(settings.min_line_height, 20);
        assert!(!template.preserve_original_colors);
        assert!(!template.save_transparent);
    }

    #[test]
    fn test_summary_message() {
        let summary = BatchSummary {
            pages: 3,
            failed: 1,
            lines: 41,
        };
        assert_eq!(
            summary.to_string(),
            "Processed 3 pages. Extracted 41 lines in total."
        );
    }
}

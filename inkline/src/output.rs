//! Writing line images to disk

use crate::error::{InklineError, InklineResult};
use inkline_core::ImageFormat;
use inkline_io::write_image;
use inkline_recog::{ExtractedLine, line_file_name};
use std::fs;
use std::path::{Path, PathBuf};

/// Format of every written line file
pub const LINE_FORMAT: ImageFormat = ImageFormat::Png;

/// Base name used for the line files of a page: the file stem of its path.
pub fn page_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "page".to_string())
}

/// Write each line as `{base}_line_NN.png` into `dir`, creating it if needed.
///
/// Returns the written paths in line order.
pub fn write_lines(lines: &[ExtractedLine], dir: &Path, base: &str) -> InklineResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(InklineError::fs(dir))?;

    lines
        .iter()
        .map(|line| {
            let path = dir.join(line_file_name(base, line.index, LINE_FORMAT.extension()));
            write_image(&line.pix, &path, LINE_FORMAT)?;
            log::trace!("wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_base_name() {
        assert_eq!(page_base_name(Path::new("/scans/page_004.tif")), "page_004");
        assert_eq!(page_base_name(Path::new("cover.png")), "cover");
        assert_eq!(page_base_name(Path::new("archive.tar.png")), "archive.tar");
        assert_eq!(page_base_name(Path::new("/")), "page");
    }
}

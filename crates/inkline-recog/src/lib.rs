//! inkline-recog - Text line grouping and extraction
//!
//! The last stages of the page pipeline:
//!
//! - [`group_into_lines`] - merge components into text lines by vertical gap
//! - [`extract_lines`] - crop and render each line of a page
//! - [`preprocess`] / [`process_page`] - whole-page entry points
//!
//! # Examples
//!
//! ```
//! use inkline_core::{Pix, Settings, color};
//! use inkline_recog::extract_lines;
//!
//! let mut page = Pix::new_filled(100, 200, color::WHITE).unwrap().to_mut();
//! for y in 90..110 {
//!     for x in 10..90 {
//!         page.set_pixel(x, y, color::BLACK).unwrap();
//!     }
//! }
//!
//! let lines = extract_lines(&page.into(), &Settings::default()).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].pix.height(), 20);
//! ```

mod error;
pub mod extract;
pub mod pipeline;
pub mod textline;

pub use error::{RecogError, RecogResult};
pub use extract::{
    ExtractedLine, LINE_MARGIN, Segmentation, empty_line, extract_line, extract_line_or_empty,
    extract_lines, line_bounds, render_line, segment_lines,
};
pub use pipeline::{PageResult, line_file_name, preprocess, process_page};
pub use textline::{LineGroup, group_into_lines};

pub use inkline_core;

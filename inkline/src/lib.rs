//! inkline - Split scanned script pages into line images
//!
//! A page goes through ink classification, optional binarization and
//! noise removal, connected-component labeling and line grouping; each
//! line comes out as its own cropped image.
//!
//! # Example
//!
//! ```
//! use inkline::{Pix, Settings, color};
//! use inkline::recog::extract_lines;
//!
//! let mut page = Pix::new_filled(100, 120, color::WHITE).unwrap().to_mut();
//! for y in 40..60 {
//!     for x in 10..90 {
//!         page.set_pixel(x, y, color::BLACK).unwrap();
//!     }
//! }
//!
//! let lines = extract_lines(&page.into(), &Settings::default()).unwrap();
//! assert_eq!(lines.len(), 1);
//! ```

pub mod batch;
pub mod bin_common;
mod error;
pub mod output;
pub mod split;

pub use error::{InklineError, InklineResult};

// Re-export core types (primary data structures used everywhere)
pub use inkline_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use inkline_color as ink;
pub use inkline_filter as filter;
pub use inkline_io as io;
pub use inkline_recog as recog;
pub use inkline_region as region;

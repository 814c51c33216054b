//! inkline-region - Ink maps and connected components
//!
//! # Examples
//!
//! ```
//! use inkline_core::{Pix, Settings, color};
//! use inkline_region::{InkMap, find_components};
//!
//! let mut pix = Pix::new_filled(20, 10, color::WHITE).unwrap().to_mut();
//! pix.set_pixel(2, 2, color::BLACK).unwrap();
//! pix.set_pixel(3, 2, color::BLACK).unwrap();
//! pix.set_pixel(15, 7, color::BLACK).unwrap();
//!
//! let map = InkMap::from_pix(&pix.into(), &Settings::default());
//! let components = find_components(&map);
//! assert_eq!(components.len(), 2);
//! ```

pub mod conncomp;
mod error;
pub mod inkmap;

pub use conncomp::{Component, find_components, find_page_components};
pub use error::{RegionError, RegionResult};
pub use inkmap::InkMap;

//! inkline Color - Ink classification and binarization
//!
//! - **Classification** ([`classify`]): dark/colored ink tests, ink type
//!   buckets, output pixel rendering
//! - **Thresholding** ([`threshold`]): gray histogram and Otsu's method
//! - **Binarization** ([`binarize`]): black/white page from the classifier

pub mod binarize;
pub mod classify;
pub mod error;
pub mod threshold;

// Re-export core types
pub use inkline_core;

pub use error::{ColorError, ColorResult};

pub use binarize::{binarize, effective_threshold, ink_mask, resolve_settings};
pub use classify::{InkType, classify_ink_type, is_ink, render_pixel};
pub use threshold::{compute_otsu_threshold, gray_histogram, otsu_threshold_from_histogram};

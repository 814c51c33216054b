//! Error types for inkline-recog

use thiserror::Error;

/// Errors that can occur during line segmentation
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Binarization error
    #[error("color error: {0}")]
    Color(#[from] inkline_color::ColorError),

    /// Noise filter error
    #[error("filter error: {0}")]
    Filter(#[from] inkline_filter::FilterError),

    /// Component labeling error
    #[error("region error: {0}")]
    Region(#[from] inkline_region::RegionError),

    /// Line bounds collapse or fall outside the page
    #[error("invalid line geometry: {0}")]
    InvalidGeometry(String),

    /// Line is shorter than the configured minimum
    #[error("line height {height} is below the minimum {min}")]
    BelowMinimumHeight { height: u32, min: u32 },
}

impl RecogError {
    /// Whether this error marks a line that is skipped rather than failed
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidGeometry(_) | Self::BelowMinimumHeight { .. }
        )
    }
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;

//! Error types for inkline-color

use thiserror::Error;

/// Errors that can occur during classification and binarization
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error (including rejected settings)
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;

//! Error types for the inkline facade

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading pages and writing line files
#[derive(Debug, Error)]
pub enum InklineError {
    /// Invalid settings or page geometry
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Decoding or encoding failed
    #[error("image error: {0}")]
    Image(#[from] inkline_io::IoError),

    /// Segmentation failed
    #[error("segmentation error: {0}")]
    Recog(#[from] inkline_recog::RecogError),

    /// A directory could not be read or created
    #[error("file system error at {path:?}: {source}")]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InklineError {
    pub(crate) fn fs(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Fs { path, source }
    }
}

/// Result type for facade operations
pub type InklineResult<T> = std::result::Result<T, InklineError>;

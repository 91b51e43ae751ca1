//! Error types for the two seams that need distinct failure variants.
//!
//! Everything else in the crate uses `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an analysis could not start: there is no usable image.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("clipboard is empty or does not contain an image")]
    NoImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Accuracy is undefined when no notes were counted.
    #[error("cannot compute accuracy rate for a chart with zero notes")]
    NoNotes,
}

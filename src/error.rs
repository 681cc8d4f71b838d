//! Error types for screenshot analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a screenshot, or the whole run, from being analyzed.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The screenshot directory is missing or holds no qualifying image files
    #[error("No screenshots found in {}", dir.display())]
    NoScreenshotsFound { dir: PathBuf },

    /// A screenshot could not be opened or decoded
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Every screenshot of the run was skipped, so nothing was checked
    #[error("None of the {skipped} screenshots could be analyzed")]
    NoReadableScreenshots { skipped: usize },

    /// A screenshot decoded to an image without any pixels
    #[error("Invalid image {file}: {width}x{height}")]
    InvalidImage {
        file: String,
        width: u32,
        height: u32,
    },
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

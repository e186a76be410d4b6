//! Error types for diagram rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DiagramError.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Primary error type for diagram operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    // === Asset Errors ===
    #[error("Failed to load asset '{path}': {source}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load font: {0}")]
    FontLoad(String),

    #[error("Invalid sprite scale factor {0} (must be > 0 and keep both dimensions >= 1px)")]
    InvalidScale(f32),

    // === Scenario Errors ===
    #[error("Scenario precondition violated: {0}")]
    Precondition(String),

    // === Style Errors ===
    #[error("Invalid style definition: {0}")]
    Style(String),

    // === Output Errors ===
    #[error("Failed to encode diagram: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

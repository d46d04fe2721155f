//! Error types for spritematch.

use thiserror::Error;

/// Result alias for spritematch operations.
pub type SpriteMatchResult<T> = std::result::Result<T, SpriteMatchError>;

/// Errors that can occur while matching sprites or writing annotations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpriteMatchError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not hold enough elements for the view.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The sprite does not fit inside the searched image.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit inside image {img_width}x{img_height}"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// An image file could not be decoded.
    #[error("failed to load image {path}: {reason}")]
    ImageIo { path: String, reason: String },
    /// A filesystem operation failed.
    #[error("i/o error on {path}: {reason}")]
    Io { path: String, reason: String },
}

impl SpriteMatchError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

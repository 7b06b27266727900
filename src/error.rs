use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing error on {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PNG optimization error on {path:?}: {message}")]
    PngOptimization { path: PathBuf, message: String },

    #[error("WebP encoding error on {path:?}: {message}")]
    WebpEncoding { path: PathBuf, message: String },

    #[error("Metadata embedding error on {path:?}: {message}")]
    MetadataEmbedding { path: PathBuf, message: String },

    #[error("Invalid input path: {0:?}")]
    InvalidInputPath(PathBuf),

    #[error("Failed to create output directory {path:?}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("No image was processed successfully")]
    NoImagesProcessed,
}

impl CompressionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompressionError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        CompressionError::Image {
            path: path.into(),
            source,
        }
    }

    /// True for failures raised by the codec or the filesystem while reading
    /// or writing a single image.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            CompressionError::Io { .. }
                | CompressionError::Image { .. }
                | CompressionError::PngOptimization { .. }
                | CompressionError::WebpEncoding { .. }
                | CompressionError::MetadataEmbedding { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;

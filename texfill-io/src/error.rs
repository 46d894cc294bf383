//! Error types for image I/O

use thiserror::Error;

/// Errors that can occur while reading or writing image files
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported image format: {format}")]
    InvalidFormat { format: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Encode error: {message}")]
    EncodeError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImageIoError> for texfill_core::Error {
    fn from(e: ImageIoError) -> Self {
        match e {
            ImageIoError::Io(io) => texfill_core::Error::Io(io),
            ImageIoError::InvalidFormat { format } => texfill_core::Error::UnsupportedFormat(format),
            other => texfill_core::Error::Image(other.to_string()),
        }
    }
}

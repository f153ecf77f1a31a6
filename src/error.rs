//! Error type returned by every editing operation.
//!
//! Lower layers keep their own error types ([`BackendError`],
//! [`FetchError`](crate::source::FetchError)); they fold into
//! [`EditorError`] unchanged so the host sees one failed step with the
//! original message.

use crate::color::ColorError;
use crate::imaging::BackendError;
use crate::source::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No valid images provided: supply image URLs or a binary image")]
    NoInput,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Unsupported mode: \"{0}\" (expected collage, addText or addWatermark)")]
    UnsupportedMode(String),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("Image processing failed: {0}")]
    Backend(BackendError),
}

pub type Result<T> = std::result::Result<T, EditorError>;

impl EditorError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}

impl From<BackendError> for EditorError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decode(msg) => EditorError::Decode(msg),
            other => EditorError::Backend(other),
        }
    }
}

impl From<ColorError> for EditorError {
    fn from(err: ColorError) -> Self {
        EditorError::InvalidOptions(err.to_string())
    }
}

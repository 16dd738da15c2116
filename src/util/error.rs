//! Error types for yolodecode.

use thiserror::Error;

/// Result alias for yolodecode operations.
pub type YoloDecodeResult<T> = std::result::Result<T, YoloDecodeError>;

/// Errors that can occur while configuring or running the decode pipeline.
///
/// Only structural problems are reported here. Arithmetic degeneracies such
/// as zero-area boxes or empty candidate lists produce empty or zero results
/// instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum YoloDecodeError {
    /// A flat buffer does not have the length implied by its shape.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    /// The detector configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    ConfigurationInvalid { reason: String },
    /// Image decoding failed (image-io feature).
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

impl YoloDecodeError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        YoloDecodeError::ConfigurationInvalid {
            reason: reason.into(),
        }
    }
}

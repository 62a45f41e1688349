//! Codec errors.

use thiserror::Error;

/// Errors from encoding or decoding wire messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Payload is not well-formed JSON, or a recognized event has fields of
    /// the wrong type.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Serialization failed.
    #[error("encode failed: {0}")]
    Encode(String),
}

//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode value to CBOR.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode CBOR bytes.
    #[error("decoding failed: {message}")]
    DecodingFailed {
        /// Description of the decoding error.
        message: String,
    },

    /// The data does not start with the shard magic.
    #[error("invalid shard magic")]
    InvalidMagic,

    /// The shard was written by a newer format version.
    #[error("unsupported shard version: {0}")]
    UnsupportedVersion(u16),

    /// Unexpected end of input.
    #[error("unexpected end of input: need {needed} bytes, have {available}")]
    UnexpectedEof {
        /// Bytes required by the header.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// Checksum mismatch detected.
    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the file.
        expected: u32,
        /// Checksum computed over the data.
        actual: u32,
    },

    /// The payload holds a different number of items than the header says.
    #[error("item count mismatch: header says {expected}, payload has {actual}")]
    CountMismatch {
        /// Count from the header.
        expected: u32,
        /// Count decoded from the payload.
        actual: usize,
    },

    /// Too many items to fit the header's count field.
    #[error("shard too large: {0} items")]
    TooLarge(usize),
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            message: message.into(),
        }
    }
}

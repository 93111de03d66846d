//! Error types for tracksets core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building, reading or exporting shards.
///
/// The segmentation engine itself never fails; every variant here comes
/// from the ping source, the shard store or the filesystem.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Shard storage error.
    #[error("storage error: {0}")]
    Storage(#[from] tracksets_storage::StorageError),

    /// Shard codec error.
    #[error("codec error: {0}")]
    Codec(#[from] tracksets_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reader error (unreadable file or uncoercible field).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A ping record could not be converted to a typed ping.
    #[error("invalid record at row {row}: {message}")]
    InvalidRecord {
        /// 1-based data row (the header is row 0).
        row: u64,
        /// Description of the problem.
        message: String,
    },

    /// The configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// The shard directory already holds shards from an earlier run.
    #[error("shard directory already holds {count} shards")]
    ShardsExist {
        /// Number of shard files found.
        count: usize,
    },
}

impl CoreError {
    /// Creates an invalid record error.
    pub fn invalid_record(row: u64, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

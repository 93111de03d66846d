//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested shard does not exist.
    #[error("shard {index} not found")]
    ShardNotFound {
        /// The requested shard index.
        index: u32,
    },

    /// Shard indices are not contiguous from zero.
    #[error("shard set is incomplete: {found} shard files but shard {missing} is missing")]
    MissingShard {
        /// Number of shard files found.
        found: u32,
        /// The lowest missing index.
        missing: u32,
    },

    /// The shard directory does not exist or is not a directory.
    #[error("not a shard directory: {0}")]
    NotADirectory(String),

    /// Another process holds the writer lock.
    #[error("shard directory locked: another process is writing shards")]
    Locked,
}

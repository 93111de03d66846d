//! # Tracksets Storage
//!
//! Shard storage backends for tracksets.
//!
//! A shard is the unit of persistence: one opaque blob per integer index,
//! numbered contiguously from 0. Backends do not interpret the bytes they
//! store; the shard file format belongs to `tracksets_codec`.
//!
//! ## Design Principles
//!
//! - Backends are simple keyed blob stores (write, read, count, clear)
//! - A shard write is atomic: a shard is either fully visible or absent
//! - Indices are contiguous; a gap is reported as corruption
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing
//! - [`DirectoryBackend`] - One file per shard under a dedicated directory
//!
//! ## Example
//!
//! ```rust
//! use tracksets_storage::{InMemoryBackend, ShardBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write_shard(0, b"tracks").unwrap();
//! assert_eq!(backend.shard_count().unwrap(), 1);
//! assert_eq!(backend.read_shard(0).unwrap(), b"tracks");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod directory;
mod error;
mod memory;

pub use backend::{ShardBackend, ShardIndex};
pub use directory::DirectoryBackend;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryBackend;

//! In-memory shard backend for testing.

use crate::backend::{contiguous_count, ShardBackend, ShardIndex};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory shard backend.
///
/// This backend keeps every shard in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Dry runs that don't need persistence
///
/// # Example
///
/// ```rust
/// use tracksets_storage::{InMemoryBackend, ShardBackend};
///
/// let mut backend = InMemoryBackend::new();
/// backend.write_shard(0, b"first").unwrap();
/// backend.write_shard(1, b"second").unwrap();
/// assert_eq!(backend.shard_count().unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    shards: RwLock<BTreeMap<ShardIndex, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of bytes held across all shards.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.shards.read().values().map(Vec::len).sum()
    }

    /// Removes a single shard, leaving a gap.
    ///
    /// Useful for testing incomplete shard sets.
    pub fn remove_shard(&mut self, index: ShardIndex) -> Option<Vec<u8>> {
        self.shards.write().remove(&index)
    }
}

impl ShardBackend for InMemoryBackend {
    fn write_shard(&mut self, index: ShardIndex, data: &[u8]) -> StorageResult<()> {
        self.shards.write().insert(index, data.to_vec());
        Ok(())
    }

    fn read_shard(&self, index: ShardIndex) -> StorageResult<Vec<u8>> {
        self.shards
            .read()
            .get(&index)
            .cloned()
            .ok_or(StorageError::ShardNotFound { index })
    }

    fn shard_count(&self) -> StorageResult<ShardIndex> {
        contiguous_count(self.shards.read().keys().copied())
    }

    fn clear(&mut self) -> StorageResult<usize> {
        let mut shards = self.shards.write();
        let removed = shards.len();
        shards.clear();
        Ok(removed)
    }
}

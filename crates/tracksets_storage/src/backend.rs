//! Shard backend trait definition.

use crate::error::{StorageError, StorageResult};

/// Index of a shard within a shard set. Shards are numbered from 0.
pub type ShardIndex = u32;

/// A low-level storage backend for shards.
///
/// Backends are **opaque blob stores** keyed by shard index. They do not
/// understand tracks or the shard file format.
///
/// # Invariants
///
/// - `read_shard(i)` returns exactly the bytes last written by `write_shard(i, ..)`
/// - `write_shard` is atomic: readers never observe a partially written shard
/// - `shard_count` is `n` iff shards `0..n` exist and no others do
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::DirectoryBackend`] - For persistent storage
pub trait ShardBackend: Send + Sync {
    /// Writes (or replaces) shard `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs. On error the shard is not
    /// visible to readers.
    fn write_shard(&mut self, index: ShardIndex, data: &[u8]) -> StorageResult<()>;

    /// Reads the full contents of shard `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::ShardNotFound`] if the shard does not
    /// exist, or an I/O error.
    fn read_shard(&self, index: ShardIndex) -> StorageResult<Vec<u8>>;

    /// Returns the number of shards present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::MissingShard`] if indices are not
    /// contiguous from zero.
    fn shard_count(&self) -> StorageResult<ShardIndex>;

    /// Removes every shard.
    ///
    /// Returns the number of shards removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a shard cannot be removed.
    fn clear(&mut self) -> StorageResult<usize>;
}

/// Checks that `indices` (in any order) are exactly `0..n` and returns `n`.
pub(crate) fn contiguous_count(
    indices: impl IntoIterator<Item = ShardIndex>,
) -> StorageResult<ShardIndex> {
    let mut indices: Vec<ShardIndex> = indices.into_iter().collect();
    indices.sort_unstable();

    let found = ShardIndex::try_from(indices.len()).unwrap_or(ShardIndex::MAX);
    for (expected, index) in (0..).zip(indices) {
        if index != expected {
            return Err(StorageError::MissingShard {
                found,
                missing: expected,
            });
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_from_zero() {
        assert_eq!(contiguous_count([2, 0, 1]).unwrap(), 3);
        assert_eq!(contiguous_count([]).unwrap(), 0);
    }

    #[test]
    fn gap_reports_lowest_missing() {
        let err = contiguous_count([0, 3, 1]).unwrap_err();
        assert!(matches!(
            err,
            StorageError::MissingShard {
                found: 3,
                missing: 2
            }
        ));
    }

    #[test]
    fn missing_zero() {
        let err = contiguous_count([1]).unwrap_err();
        assert!(matches!(err, StorageError::MissingShard { missing: 0, .. }));
    }
}

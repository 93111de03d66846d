//! Typed shard store over an opaque shard backend.

use crate::error::{CoreError, CoreResult};
use crate::types::Track;
use tracing::warn;
use tracksets_codec::{decode_shard, encode_shard, peek_header};
use tracksets_storage::{ShardBackend, ShardIndex, StorageError};

/// Summary of one stored shard, read from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardInfo {
    /// Shard index.
    pub index: ShardIndex,
    /// Number of tracks in the shard.
    pub tracks: u32,
    /// Encoded size in bytes.
    pub bytes: usize,
}

/// Reads and writes shards of tracks.
///
/// Each shard is one ordered sequence of tracks, encoded with
/// `tracksets_codec` and stored under its index by the backend.
pub struct ShardStore {
    backend: Box<dyn ShardBackend>,
}

impl std::fmt::Debug for ShardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardStore").finish_non_exhaustive()
    }
}

impl ShardStore {
    /// Creates a store over `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn ShardBackend>) -> Self {
        Self { backend }
    }

    /// Writes `tracks` as shard `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn write(&mut self, index: ShardIndex, tracks: &[Track]) -> CoreResult<()> {
        let bytes = encode_shard(tracks)?;
        self.backend.write_shard(index, &bytes)?;
        Ok(())
    }

    /// Reads shard `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shard is missing or fails to decode.
    pub fn read(&self, index: ShardIndex) -> CoreResult<Vec<Track>> {
        let bytes = self.backend.read_shard(index)?;
        Ok(decode_shard(&bytes)?)
    }

    /// Reads shard `index` together with its header summary, from a
    /// single backend read.
    ///
    /// # Errors
    ///
    /// Returns an error if the shard is missing or fails to decode.
    pub fn read_with_info(&self, index: ShardIndex) -> CoreResult<(ShardInfo, Vec<Track>)> {
        let bytes = self.backend.read_shard(index)?;
        let header = peek_header(&bytes)?;
        let tracks = decode_shard(&bytes)?;
        let info = ShardInfo {
            index,
            tracks: header.item_count,
            bytes: bytes.len(),
        };
        Ok((info, tracks))
    }

    /// Number of shards in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the shard set has a gap.
    pub fn shard_count(&self) -> CoreResult<ShardIndex> {
        Ok(self.backend.shard_count()?)
    }

    /// Iterates over all shards in index order.
    ///
    /// # Errors
    ///
    /// Returns an error up front if the shard count cannot be determined;
    /// each item carries its own read error.
    pub fn iter(
        &self,
    ) -> CoreResult<impl Iterator<Item = CoreResult<(ShardIndex, Vec<Track>)>> + '_> {
        let count = self.shard_count()?;
        Ok((0..count).map(move |index| self.read(index).map(|tracks| (index, tracks))))
    }

    /// Makes sure the store holds no shards before a build.
    ///
    /// Existing shards are removed when `overwrite` is set; otherwise their
    /// presence is an error, since leftover higher-index shards would be
    /// read back as part of the new run.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShardsExist`] if shards exist and `overwrite` is
    /// false, or a storage error.
    pub fn prepare(&mut self, overwrite: bool) -> CoreResult<()> {
        let existing = match self.backend.shard_count() {
            Ok(count) => count,
            Err(StorageError::MissingShard { found, .. }) => found,
            Err(e) => return Err(e.into()),
        };

        if existing == 0 {
            return Ok(());
        }
        if !overwrite {
            return Err(CoreError::ShardsExist {
                count: existing as usize,
            });
        }

        let removed = self.backend.clear()?;
        warn!(removed, "removed shards from a previous run");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ping;
    use chrono::{TimeZone, Utc};
    use tracksets_storage::InMemoryBackend;

    fn track(id: &str, n: usize) -> Track {
        let mut points = Vec::new();
        for i in 0..n {
            let ts = Utc.timestamp_opt(1_600_000_000 + i as i64, 0).unwrap();
            points.push(Ping::new(i as f64 * 0.01, 0.5, i % 2 == 0, ts));
        }
        Track {
            object_id: id.to_string(),
            split: false,
            points,
        }
    }

    #[test]
    fn write_read_preserves_order_and_fields() {
        let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
        let tracks = vec![track("a", 3), track("b", 1), track("c", 5)];

        store.write(0, &tracks).unwrap();

        assert_eq!(store.shard_count().unwrap(), 1);
        assert_eq!(store.read(0).unwrap(), tracks);
    }

    #[test]
    fn read_with_info_reports_header() {
        let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
        let tracks = vec![track("a", 3), track("b", 2)];
        store.write(0, &tracks).unwrap();

        let (info, read) = store.read_with_info(0).unwrap();
        assert_eq!(info.index, 0);
        assert_eq!(info.tracks, 2);
        assert_eq!(info.bytes, store.backend.read_shard(0).unwrap().len());
        assert_eq!(read, tracks);
    }

    #[test]
    fn iter_visits_in_index_order() {
        let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
        store.write(1, &[track("b", 1)]).unwrap();
        store.write(0, &[track("a", 1)]).unwrap();

        let ids: Vec<String> = store
            .iter()
            .unwrap()
            .map(|shard| shard.unwrap().1[0].object_id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn read_missing_is_error() {
        let store = ShardStore::new(Box::new(InMemoryBackend::new()));
        assert!(matches!(
            store.read(0),
            Err(CoreError::Storage(StorageError::ShardNotFound { index: 0 }))
        ));
    }

    #[test]
    fn prepare_refuses_existing_shards() {
        let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
        store.write(0, &[track("a", 1)]).unwrap();

        assert!(matches!(
            store.prepare(false),
            Err(CoreError::ShardsExist { count: 1 })
        ));

        store.prepare(true).unwrap();
        assert_eq!(store.shard_count().unwrap(), 0);
    }

    #[test]
    fn prepare_on_empty_store() {
        let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
        store.prepare(false).unwrap();
    }
}

//! Accumulates closed tracks and flushes them as shards.

use crate::error::CoreResult;
use crate::shard::store::ShardStore;
use crate::types::Track;
use tracing::debug;
use tracksets_storage::ShardIndex;

/// Buffers closed tracks until their point count reaches the budget.
///
/// Shards are numbered from 0 in flush order; tracks keep the order in
/// which they were submitted. A track is never split across shards.
#[derive(Debug)]
pub struct ShardBuffer<'a> {
    store: &'a mut ShardStore,
    point_budget: usize,
    pending: Vec<Track>,
    pending_points: usize,
    next_index: ShardIndex,
}

impl<'a> ShardBuffer<'a> {
    /// Creates an empty buffer writing into `store`, starting at shard 0.
    pub fn new(store: &'a mut ShardStore, point_budget: usize) -> Self {
        Self {
            store,
            point_budget,
            pending: Vec::new(),
            pending_points: 0,
            next_index: 0,
        }
    }

    /// Adds a closed track, flushing a shard if the budget is reached.
    ///
    /// Returns the index of the shard written, if this call flushed one.
    ///
    /// # Errors
    ///
    /// Returns an error if the shard cannot be persisted. The run should
    /// be aborted: the buffer keeps its pending tracks but the shard set on
    /// disk is incomplete.
    pub fn submit(&mut self, track: Track) -> CoreResult<Option<ShardIndex>> {
        self.pending_points += track.points.len();
        self.pending.push(track);

        if self.pending_points >= self.point_budget {
            return self.flush().map(Some);
        }
        Ok(None)
    }

    /// Flushes whatever is still buffered and returns the number of shards
    /// written over the buffer's lifetime.
    ///
    /// An empty buffer writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the final shard cannot be persisted.
    pub fn finish(mut self) -> CoreResult<ShardIndex> {
        if !self.pending.is_empty() {
            self.flush()?;
        }
        Ok(self.next_index)
    }

    /// Tracks waiting for the next flush.
    #[must_use]
    pub fn pending_tracks(&self) -> &[Track] {
        &self.pending
    }

    /// Points held by the pending tracks, bridging points included.
    #[must_use]
    pub fn pending_points(&self) -> usize {
        self.pending_points
    }

    /// Number of shards written so far.
    #[must_use]
    pub fn shards_written(&self) -> ShardIndex {
        self.next_index
    }

    fn flush(&mut self) -> CoreResult<ShardIndex> {
        let index = self.next_index;
        self.store.write(index, &self.pending)?;

        debug!(
            shard = index,
            tracks = self.pending.len(),
            points = self.pending_points,
            "flushed shard"
        );

        self.pending.clear();
        self.pending_points = 0;
        self.next_index += 1;
        Ok(index)
    }
}

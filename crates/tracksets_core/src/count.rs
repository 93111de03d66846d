//! Tracked/untracked point accounting over stored shards.

use crate::error::CoreResult;
use crate::shard::ShardStore;
use crate::types::Track;
use serde::Serialize;
use tracing::debug;

/// Point totals split by whether the point belongs to a real track.
///
/// Bridging points are counted once, with the track they close, so
/// `total()` equals the number of pings the shards were built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointCounts {
    /// Points in tracks with at least two points.
    pub tracked: u64,
    /// Lone pings.
    pub untracked: u64,
}

impl PointCounts {
    /// Adds one track's own points.
    pub fn add(&mut self, track: &Track) {
        let points = track.own_points() as u64;
        if track.is_tracked() {
            self.tracked += points;
        } else {
            self.untracked += points;
        }
    }

    /// Tracked plus untracked points.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.tracked + self.untracked
    }
}

/// Counts tracked and untracked points over every shard in `store`.
///
/// # Errors
///
/// Returns an error if a shard cannot be read.
pub fn count_points(store: &ShardStore) -> CoreResult<PointCounts> {
    let mut counts = PointCounts::default();

    for shard in store.iter()? {
        let (index, tracks) = shard?;
        for track in &tracks {
            counts.add(track);
        }
        debug!(
            shard = index,
            tracked = counts.tracked,
            untracked = counts.untracked,
            "counted shard"
        );
    }

    Ok(counts)
}

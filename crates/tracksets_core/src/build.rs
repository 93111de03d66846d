//! The build pipeline: ping source → segmenter → shard buffer → store.

use crate::config::Config;
use crate::error::CoreResult;
use crate::segmenter::Segmenter;
use crate::shard::{ShardBuffer, ShardIndex, ShardStore};
use crate::types::{ObjectPing, Track};
use tracing::info;

/// Pings between two progress events.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Outcome of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pings consumed from the source.
    pub pings: u64,
    /// Tracks closed and stored.
    pub tracks: u64,
    /// How many of those tracks are split tracks.
    pub split_tracks: u64,
    /// Shards written.
    pub shards: ShardIndex,
}

impl BuildSummary {
    fn record(&mut self, track: &Track) {
        self.tracks += 1;
        if track.split {
            self.split_tracks += 1;
        }
    }
}

/// Segments a ping stream into tracks and stores them as shards.
///
/// `expected_pings`, when known, is only used to report progress as a
/// percentage. The store should be empty (see [`ShardStore::prepare`]).
///
/// # Errors
///
/// Returns the first source or storage error; the run stops there and
/// the shard set is incomplete.
pub fn build<I>(
    pings: I,
    store: &mut ShardStore,
    config: &Config,
    expected_pings: Option<u64>,
) -> CoreResult<BuildSummary>
where
    I: IntoIterator<Item = CoreResult<ObjectPing>>,
{
    config.validate()?;

    let mut segmenter = Segmenter::new(config);
    let mut buffer = ShardBuffer::new(store, config.shard_point_budget);
    let mut summary = BuildSummary::default();

    for item in pings {
        let ObjectPing { object_id, ping } = item?;
        summary.pings += 1;

        if let Some(track) = segmenter.process(&object_id, ping) {
            summary.record(&track);
            buffer.submit(track)?;
        }

        if summary.pings % PROGRESS_INTERVAL == 0 {
            report_progress(summary.pings, expected_pings);
        }
    }

    if let Some(track) = segmenter.finish() {
        summary.record(&track);
        buffer.submit(track)?;
    }
    summary.shards = buffer.finish()?;

    info!(
        pings = summary.pings,
        tracks = summary.tracks,
        split_tracks = summary.split_tracks,
        shards = summary.shards,
        "tracksets built"
    );

    Ok(summary)
}

fn report_progress(done: u64, expected: Option<u64>) {
    match expected {
        Some(total) if total > 0 => {
            let percent = done.saturating_mul(100) / total;
            info!(pings = done, "building tracksets: {percent}%");
        }
        _ => info!(pings = done, "building tracksets"),
    }
}

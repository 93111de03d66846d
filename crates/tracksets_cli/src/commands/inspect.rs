//! Inspect command implementation.

use crate::commands::open_store;
use serde::Serialize;
use std::path::Path;
use tracksets_core::{ShardStore, Track};

/// Shard set inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Shard directory path.
    pub path: String,
    /// Number of shards.
    pub shard_count: u32,
    /// Total size of all shard files in bytes.
    pub total_bytes: usize,
    /// Total number of tracks.
    pub track_count: usize,
    /// Total number of split tracks.
    pub split_count: usize,
    /// Total number of stored points, bridging points included.
    pub point_count: usize,
    /// Total number of tracks with fewer than two points.
    pub lone_pings: usize,
    /// Per-shard statistics.
    pub shards: Vec<ShardStats>,
}

/// Statistics for a single shard.
#[derive(Debug, Serialize)]
pub struct ShardStats {
    /// Shard index.
    pub index: u32,
    /// Encoded size in bytes.
    pub bytes: usize,
    /// Number of tracks.
    pub tracks: usize,
    /// Number of split tracks.
    pub split_tracks: usize,
    /// Number of stored points.
    pub points: usize,
    /// Number of tracks with fewer than two points.
    pub lone_pings: usize,
}

/// Runs the inspect command.
pub fn run(shards: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(shards)?;
    let result = inspect(&store, shards)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(store: &ShardStore, path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let mut result = InspectResult {
        path: path.display().to_string(),
        shard_count: store.shard_count()?,
        total_bytes: 0,
        track_count: 0,
        split_count: 0,
        point_count: 0,
        lone_pings: 0,
        shards: Vec::new(),
    };

    for index in 0..result.shard_count {
        let (info, tracks) = store.read_with_info(index)?;
        let stats = shard_stats(index, info.bytes, &tracks);

        result.total_bytes += stats.bytes;
        result.track_count += stats.tracks;
        result.split_count += stats.split_tracks;
        result.point_count += stats.points;
        result.lone_pings += stats.lone_pings;
        result.shards.push(stats);
    }

    Ok(result)
}

fn shard_stats(index: u32, bytes: usize, tracks: &[Track]) -> ShardStats {
    ShardStats {
        index,
        bytes,
        tracks: tracks.len(),
        split_tracks: tracks.iter().filter(|t| t.split).count(),
        points: tracks.iter().map(Track::len).sum(),
        lone_pings: tracks.iter().filter(|t| !t.is_tracked()).count(),
    }
}

fn print_text_output(result: &InspectResult) {
    println!("Tracksets at {}", result.path);
    println!();
    println!("  Shards:       {}", result.shard_count);
    println!("  Size:         {}", format_size(result.total_bytes));
    println!("  Tracks:       {}", result.track_count);
    println!("  Split tracks: {}", result.split_count);
    println!("  Points:       {}", result.point_count);
    println!("  Lone pings:   {}", result.lone_pings);

    if !result.shards.is_empty() {
        println!();
        println!(
            "  {:>6} {:>10} {:>8} {:>8} {:>10} {:>6}",
            "shard", "size", "tracks", "split", "points", "lone"
        );
        for shard in &result.shards {
            println!(
                "  {:>6} {:>10} {:>8} {:>8} {:>10} {:>6}",
                shard.index,
                format_size(shard.bytes),
                shard.tracks,
                shard.split_tracks,
                shard.points,
                shard.lone_pings
            );
        }
    }
}

fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

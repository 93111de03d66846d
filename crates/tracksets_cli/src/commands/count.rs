//! Count command implementation.

use crate::commands::open_store;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracksets_core::count_points;

/// Point count result.
#[derive(Debug, Serialize)]
pub struct CountResult {
    /// Number of shards read.
    pub shards: u32,
    /// Points belonging to tracks of two or more points.
    pub tracked: u64,
    /// Lone pings.
    pub untracked: u64,
    /// Sum of both.
    pub total: u64,
}

/// Runs the count command.
pub fn run(shards: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Counting points in {:?}", shards);

    let result = count_shards(shards)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => println!(
            "Points counted! Tracked: {}, Untracked: {}, Total: {}",
            result.tracked, result.untracked, result.total
        ),
    }

    Ok(())
}

fn count_shards(shards: &Path) -> Result<CountResult, Box<dyn std::error::Error>> {
    let store = open_store(shards)?;
    let counts = count_points(&store)?;
    Ok(CountResult {
        shards: store.shard_count()?,
        tracked: counts.tracked,
        untracked: counts.untracked,
        total: counts.total(),
    })
}

//! Export command implementation.

use crate::commands::open_store;
use std::path::Path;
use tracing::info;
use tracksets_core::{export_tracks, ExportSummary};

/// Runs the export command.
pub fn run(shards: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Exporting tracks from {:?} to {:?}", shards, output);

    let summary = export_shards(shards, output)?;

    println!(
        "Tracks exported! {} files from {} shards ({} lone pings skipped)",
        summary.exported, summary.shards, summary.skipped
    );

    Ok(())
}

fn export_shards(shards: &Path, output: &Path) -> Result<ExportSummary, Box<dyn std::error::Error>> {
    let store = open_store(shards)?;
    Ok(export_tracks(&store, output)?)
}

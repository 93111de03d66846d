//! Build command implementation.

use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracksets_core::{build, count_rows, BuildSummary, Config, PingSource, ShardStore};
use tracksets_storage::DirectoryBackend;

/// Overrides for the default segmentation settings.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Replace shards left by a previous run.
    pub force: bool,
    /// Maximum gap within a track, in seconds.
    pub max_gap_secs: Option<u64>,
    /// Maximum jump within a track, in coordinate units.
    pub max_distance: Option<f64>,
    /// Shard point budget.
    pub shard_points: Option<usize>,
}

impl BuildOptions {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(secs) = self.max_gap_secs {
            config = config.max_time_gap(Duration::from_secs(secs));
        }
        if let Some(distance) = self.max_distance {
            config = config.max_distance(distance);
        }
        if let Some(points) = self.shard_points {
            config = config.shard_point_budget(points);
        }
        config
    }
}

/// Runs the build command.
pub fn run(
    input: &Path,
    shards: &Path,
    options: &BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = build_shards(input, shards, options)?;

    println!("Tracksets built!");
    println!("  Pings:        {}", summary.pings);
    println!("  Tracks:       {}", summary.tracks);
    println!("  Split tracks: {}", summary.split_tracks);
    println!("  Shards:       {}", summary.shards);

    Ok(())
}

fn build_shards(
    input: &Path,
    shards: &Path,
    options: &BuildOptions,
) -> Result<BuildSummary, Box<dyn std::error::Error>> {
    let config = options.config();
    config.validate()?;

    info!("Reading dataset {:?}", input);
    let expected = count_rows(input)?;

    let backend = DirectoryBackend::open_for_write(shards)?;
    let mut store = ShardStore::new(Box::new(backend));
    store.prepare(options.force)?;

    let source = PingSource::open(input)?;
    Ok(build(source, &mut store, &config, Some(expected))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_store;
    use tempfile::tempdir;
    use tracksets_core::count_points;

    const DATASET: &str = "id_object,latitude,longitude,online,date\n\
        A,0.0,0.0,1,2020-01-01 00:00:00\n\
        A,0.05,0.0,1,2020-01-01 00:00:10\n\
        A,0.0,0.0,0,2020-01-01 00:00:20\n\
        B,5.0,5.0,1,2020-01-01 00:00:20\n";

    #[test]
    fn builds_from_csv_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sorted_dataset.csv");
        std::fs::write(&input, DATASET).unwrap();
        let shards = dir.path().join("tracksets");

        let summary = build_shards(&input, &shards, &BuildOptions::default()).unwrap();
        assert_eq!(summary.pings, 4);
        assert_eq!(summary.tracks, 3);
        assert_eq!(summary.split_tracks, 1);
        assert_eq!(summary.shards, 1);

        let store = open_store(&shards).unwrap();
        assert_eq!(count_points(&store).unwrap().total(), 4);
    }

    #[test]
    fn rebuild_requires_force() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sorted_dataset.csv");
        std::fs::write(&input, DATASET).unwrap();
        let shards = dir.path().join("tracksets");

        build_shards(&input, &shards, &BuildOptions::default()).unwrap();
        assert!(build_shards(&input, &shards, &BuildOptions::default()).is_err());

        let forced = BuildOptions {
            force: true,
            ..BuildOptions::default()
        };
        let summary = build_shards(&input, &shards, &forced).unwrap();
        assert_eq!(summary.shards, 1);
    }

    #[test]
    fn small_budget_writes_several_shards() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sorted_dataset.csv");
        std::fs::write(&input, DATASET).unwrap();
        let shards = dir.path().join("tracksets");

        let options = BuildOptions {
            shard_points: Some(1),
            ..BuildOptions::default()
        };
        let summary = build_shards(&input, &shards, &options).unwrap();
        assert_eq!(summary.shards, 3);
        assert_eq!(open_store(&shards).unwrap().shard_count().unwrap(), 3);
    }
}

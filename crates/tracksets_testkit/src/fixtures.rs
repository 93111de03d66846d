//! Test fixtures and shard directory helpers.
//!
//! Provides convenience functions for building pings and setting up
//! temporary shard directories.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracksets_core::{ObjectPing, Ping, ShardStore};
use tracksets_storage::{DirectoryBackend, InMemoryBackend};

/// Header line of the ping CSV format.
pub const CSV_HEADER: &str = "id_object,latitude,longitude,online,date";

/// Reference instant all fixture timestamps are offset from.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base time")
}

/// Creates an online ping `secs` seconds after [`base_time`].
#[must_use]
pub fn ping_at(latitude: f64, longitude: f64, secs: i64) -> Ping {
    Ping::new(latitude, longitude, true, base_time() + Duration::seconds(secs))
}

/// Creates pings for one object from `(latitude, longitude, secs)` triples.
#[must_use]
pub fn object_pings(object_id: &str, points: &[(f64, f64, i64)]) -> Vec<ObjectPing> {
    points
        .iter()
        .map(|&(lat, lon, secs)| ObjectPing::new(object_id, ping_at(lat, lon, secs)))
        .collect()
}

/// Formats pings as a CSV document, header included.
#[must_use]
pub fn to_csv(pings: &[ObjectPing]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for ObjectPing { object_id, ping } in pings {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            object_id,
            ping.latitude,
            ping.longitude,
            u8::from(ping.online),
            ping.timestamp.to_rfc3339()
        ));
    }
    out
}

/// Creates an in-memory shard store.
#[must_use]
pub fn memory_store() -> ShardStore {
    ShardStore::new(Box::new(InMemoryBackend::new()))
}

/// A temporary directory holding a shard set, removed on drop.
pub struct TempShardDir {
    dir: TempDir,
}

impl TempShardDir {
    /// Creates a new empty temporary directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory the shards live in.
    #[must_use]
    pub fn shards(&self) -> PathBuf {
        self.dir.path().join("tracksets")
    }

    /// Opens the shard directory for writing.
    #[must_use]
    pub fn store_for_write(&self) -> ShardStore {
        let backend =
            DirectoryBackend::open_for_write(&self.shards()).expect("Failed to open shard directory");
        ShardStore::new(Box::new(backend))
    }

    /// Opens the shard directory for reading.
    #[must_use]
    pub fn store(&self) -> ShardStore {
        let backend = DirectoryBackend::open(&self.shards()).expect("Failed to open shard directory");
        ShardStore::new(Box::new(backend))
    }

    /// Writes `pings` as a CSV file in the root and returns its path.
    #[must_use]
    pub fn write_csv(&self, name: &str, pings: &[ObjectPing]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = fs::File::create(&path).expect("Failed to create CSV file");
        file.write_all(to_csv(pings).as_bytes())
            .expect("Failed to write CSV file");
        path
    }
}

impl Default for TempShardDir {
    fn default() -> Self {
        Self::new()
    }
}

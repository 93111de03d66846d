//! # Tracksets Core
//!
//! Splits a time-ordered stream of geolocation pings into movement tracks
//! and stores them in fixed-budget shards.
//!
//! This crate provides:
//! - The ping/track data model
//! - The [`Segmenter`], which decides per ping whether to continue the open
//!   track, open a new one, or open a split track bridged to the previous one
//! - [`ShardBuffer`] and [`ShardStore`] for batching tracks into shards
//! - A CSV [`PingSource`]
//! - The [`build`], [`count_points`] and [`export_tracks`] pipelines
//!
//! ## Example
//!
//! ```rust
//! use tracksets_core::{build, count_points, Config, PingSource, ShardStore};
//! use tracksets_storage::InMemoryBackend;
//!
//! let csv = "id_object,latitude,longitude,online,date\n\
//!            A,0.0,0.0,1,2020-01-01 00:00:00\n\
//!            A,0.05,0.0,1,2020-01-01 00:00:10\n\
//!            A,0.0,0.0,1,2020-01-01 00:00:20\n";
//!
//! let mut store = ShardStore::new(Box::new(InMemoryBackend::new()));
//! let summary = build(
//!     PingSource::from_reader(csv.as_bytes()),
//!     &mut store,
//!     &Config::default(),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(summary.tracks, 2);
//! assert_eq!(summary.split_tracks, 1);
//!
//! let counts = count_points(&store).unwrap();
//! assert_eq!(counts.total(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod build;
mod config;
mod count;
mod envelope;
mod error;
mod export;
mod segmenter;
pub mod shard;
mod source;
mod types;

pub use build::{build, BuildSummary};
pub use config::Config;
pub use count::{count_points, PointCounts};
pub use envelope::Envelope;
pub use error::{CoreError, CoreResult};
pub use export::{export_tracks, format_float, format_point, write_track, ExportSummary};
pub use segmenter::{Segmenter, Transition};
pub use shard::{ShardBuffer, ShardIndex, ShardInfo, ShardStore};
pub use source::{count_rows, parse_timestamp, PingSource};
pub use types::{ObjectPing, Ping, Track};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

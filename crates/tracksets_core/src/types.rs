//! Ping and track data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One geolocation observation.
///
/// Pings are immutable once produced by the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    /// Latitude in raw coordinate units.
    pub latitude: f64,
    /// Longitude in raw coordinate units.
    pub longitude: f64,
    /// Whether the device reported itself online.
    pub online: bool,
    /// Observation time.
    pub timestamp: DateTime<Utc>,
}

impl Ping {
    /// Creates a new ping.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, online: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            online,
            timestamp,
        }
    }

    /// Euclidean distance to `other` in coordinate units.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }

    /// Seconds since the Unix epoch, with sub-second precision.
    #[must_use]
    pub fn unix_timestamp(&self) -> f64 {
        self.timestamp.timestamp() as f64
            + f64::from(self.timestamp.timestamp_subsec_nanos()) / 1_000_000_000.0
    }
}

/// A ping tagged with the object that produced it, as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPing {
    /// Identifier of the tracked object.
    pub object_id: String,
    /// The observation.
    pub ping: Ping,
}

impl ObjectPing {
    /// Creates a new tagged ping.
    #[must_use]
    pub fn new(object_id: impl Into<String>, ping: Ping) -> Self {
        Self {
            object_id: object_id.into(),
            ping,
        }
    }
}

/// A run of consecutive pings of one object representing one movement episode.
///
/// A closed track always has at least one point. A `split` track was opened
/// because the object re-entered the area of its predecessor; its first
/// point duplicates the predecessor's last point, so it has at least two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Identifier of the tracked object.
    pub object_id: String,
    /// Whether this track is bridged to its predecessor.
    pub split: bool,
    /// Points in stream order.
    pub points: Vec<Ping>,
}

impl Track {
    /// Opens a fresh track seeded with a single ping.
    #[must_use]
    pub fn open(object_id: impl Into<String>, ping: Ping) -> Self {
        Self {
            object_id: object_id.into(),
            split: false,
            points: vec![ping],
        }
    }

    /// Opens a split track bridged from `from`, the last ping of the previous track.
    #[must_use]
    pub fn bridged(object_id: impl Into<String>, from: Ping, ping: Ping) -> Self {
        Self {
            object_id: object_id.into(),
            split: true,
            points: vec![from, ping],
        }
    }

    /// Number of points, including a bridging point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the track has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether downstream consumers treat this as a real track (2+ points)
    /// rather than a lone ping.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.points.len() >= 2
    }

    /// Number of input pings this track accounts for: the bridging point of
    /// a split track belongs to its predecessor.
    #[must_use]
    pub fn own_points(&self) -> usize {
        self.points.len().saturating_sub(usize::from(self.split))
    }
}

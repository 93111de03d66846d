//! Axis-aligned bounding box of the open track.

use crate::types::Ping;

/// Bounding box of every point accumulated into the current track.
///
/// An empty envelope has inverted infinite bounds and contains nothing.
/// Containment is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Smallest latitude seen.
    pub min_lat: f64,
    /// Smallest longitude seen.
    pub min_long: f64,
    /// Largest latitude seen.
    pub max_lat: f64,
    /// Largest longitude seen.
    pub max_long: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

impl Envelope {
    /// An envelope containing no points.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min_lat: f64::INFINITY,
            min_long: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            max_long: f64::NEG_INFINITY,
        }
    }

    /// The degenerate box around a single ping.
    #[must_use]
    pub const fn from_point(ping: &Ping) -> Self {
        Self {
            min_lat: ping.latitude,
            min_long: ping.longitude,
            max_lat: ping.latitude,
            max_long: ping.longitude,
        }
    }

    /// Returns true if no point has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_long > self.max_long
    }

    /// Widens the box to include `ping`.
    pub fn expand(&mut self, ping: &Ping) {
        self.min_lat = self.min_lat.min(ping.latitude);
        self.min_long = self.min_long.min(ping.longitude);
        self.max_lat = self.max_lat.max(ping.latitude);
        self.max_long = self.max_long.max(ping.longitude);
    }

    /// Returns true if `ping` lies inside the box or on its edge.
    #[must_use]
    pub fn contains(&self, ping: &Ping) -> bool {
        (self.min_lat..=self.max_lat).contains(&ping.latitude)
            && (self.min_long..=self.max_long).contains(&ping.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ping(lat: f64, long: f64) -> Ping {
        Ping::new(lat, long, true, Utc.timestamp_opt(0, 0).unwrap())
    }

    #[test]
    fn empty_contains_nothing() {
        let envelope = Envelope::empty();
        assert!(envelope.is_empty());
        assert!(!envelope.contains(&ping(0.0, 0.0)));
        assert!(!envelope.contains(&ping(f64::MAX, f64::MIN)));
    }

    #[test]
    fn point_box_contains_only_that_point() {
        let envelope = Envelope::from_point(&ping(1.0, 2.0));
        assert!(!envelope.is_empty());
        assert!(envelope.contains(&ping(1.0, 2.0)));
        assert!(!envelope.contains(&ping(1.0, 2.000_001)));
    }

    #[test]
    fn expand_from_empty() {
        let mut envelope = Envelope::empty();
        envelope.expand(&ping(1.0, 5.0));
        assert_eq!(envelope, Envelope::from_point(&ping(1.0, 5.0)));

        envelope.expand(&ping(-1.0, 7.0));
        assert_eq!(envelope.min_lat, -1.0);
        assert_eq!(envelope.max_lat, 1.0);
        assert_eq!(envelope.min_long, 5.0);
        assert_eq!(envelope.max_long, 7.0);
    }

    #[test]
    fn edges_are_inclusive() {
        let mut envelope = Envelope::from_point(&ping(0.0, 0.0));
        envelope.expand(&ping(1.0, 2.0));

        assert!(envelope.contains(&ping(0.0, 1.0)));
        assert!(envelope.contains(&ping(1.0, 1.0)));
        assert!(envelope.contains(&ping(0.5, 0.0)));
        assert!(envelope.contains(&ping(0.5, 2.0)));
        assert!(envelope.contains(&ping(1.0, 2.0)));

        assert!(!envelope.contains(&ping(1.000_001, 1.0)));
        assert!(!envelope.contains(&ping(0.5, -0.000_001)));
    }
}

//! Segmentation and sharding configuration.

use crate::error::{CoreError, CoreResult};
use std::time::Duration;

/// Configuration for building tracksets.
#[derive(Debug, Clone)]
pub struct Config {
    /// A gap strictly longer than this between consecutive pings starts a new track.
    pub max_time_gap: Duration,

    /// A jump strictly longer than this (in coordinate units) starts a new track.
    pub max_distance: f64,

    /// Buffered points at which a shard is flushed.
    pub shard_point_budget: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_time_gap: Duration::from_secs(600),
            max_distance: 0.2,
            shard_point_budget: 100_000,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum time gap within a track.
    #[must_use]
    pub const fn max_time_gap(mut self, gap: Duration) -> Self {
        self.max_time_gap = gap;
        self
    }

    /// Sets the maximum jump distance within a track.
    #[must_use]
    pub fn max_distance(mut self, distance: f64) -> Self {
        self.max_distance = distance;
        self
    }

    /// Sets the shard point budget.
    #[must_use]
    pub const fn shard_point_budget(mut self, points: usize) -> Self {
        self.shard_point_budget = points;
        self
    }

    /// Checks that the thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the distance is negative or not
    /// finite, or the point budget is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(CoreError::invalid_config(format!(
                "max_distance must be a non-negative number, got {}",
                self.max_distance
            )));
        }
        if self.shard_point_budget == 0 {
            return Err(CoreError::invalid_config(
                "shard_point_budget must be at least 1",
            ));
        }
        Ok(())
    }
}

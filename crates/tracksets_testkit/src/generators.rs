//! Property-based test generators using proptest.
//!
//! Provides strategies for generating time-ordered ping streams: random
//! walks whose steps sometimes stay put, sometimes creep and sometimes jump
//! past the default distance or time thresholds.

use crate::fixtures::ping_at;
use proptest::prelude::*;
use tracksets_core::ObjectPing;

/// One random-walk step: latitude delta, longitude delta, seconds elapsed.
pub type Step = (f64, f64, i64);

/// Strategy for a single walk step.
///
/// Deltas are multiples of 1/64 so repeated walks can land exactly on
/// earlier positions and re-enter an envelope.
pub fn step_strategy() -> impl Strategy<Value = Step> {
    let elapsed = prop_oneof![
        4 => 0i64..=120,
        1 => 500i64..=1200,
    ];
    (delta_strategy(), delta_strategy(), elapsed)
}

fn delta_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => (-4i32..=4).prop_map(|n| f64::from(n) / 64.0),
        1 => (-40i32..=40).prop_map(|n| f64::from(n) / 64.0),
    ]
}

/// Strategy for object identifiers drawn from a small pool.
pub fn object_id_strategy() -> impl Strategy<Value = String> {
    (0u8..3).prop_map(|n| format!("obj_{n}"))
}

/// Strategy for a ping stream of one or more object runs.
///
/// Timestamps never decrease across the whole stream. Consecutive runs may
/// reuse the same identifier.
pub fn ping_stream_strategy(
    max_runs: usize,
    max_run_len: usize,
) -> impl Strategy<Value = Vec<ObjectPing>> {
    prop::collection::vec(
        (
            object_id_strategy(),
            prop::collection::vec(step_strategy(), 1..=max_run_len),
        ),
        0..=max_runs,
    )
    .prop_map(|runs| {
        let mut pings = Vec::new();
        let (mut lat, mut lon, mut secs) = (0.0_f64, 0.0_f64, 0_i64);
        for (object_id, steps) in runs {
            for (dlat, dlon, elapsed) in steps {
                lat += dlat;
                lon += dlon;
                secs += elapsed;
                pings.push(ObjectPing::new(object_id.as_str(), ping_at(lat, lon, secs)));
            }
        }
        pings
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn stream_is_time_ordered(pings in ping_stream_strategy(4, 12)) {
            for pair in pings.windows(2) {
                prop_assert!(pair[0].ping.timestamp <= pair[1].ping.timestamp);
            }
        }

        #[test]
        fn object_ids_come_from_pool(pings in ping_stream_strategy(4, 12)) {
            for ping in &pings {
                prop_assert!(ping.object_id.starts_with("obj_"));
            }
        }
    }
}

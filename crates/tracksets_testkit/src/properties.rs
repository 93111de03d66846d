//! Cross-crate properties of segmentation and sharding.
//!
//! The helpers here drive the [`Segmenter`] and the build pipeline over a
//! ping stream so tests can compare what went in with what came out.

use tracksets_core::{Config, CoreResult, ObjectPing, Ping, Segmenter, ShardStore, Track};

/// Runs a [`Segmenter`] over `pings` and returns every closed track in order.
#[must_use]
pub fn segment_all(pings: &[ObjectPing], config: &Config) -> Vec<Track> {
    let mut segmenter = Segmenter::new(config);
    let mut tracks: Vec<Track> = pings
        .iter()
        .filter_map(|p| segmenter.process(&p.object_id, p.ping))
        .collect();
    tracks.extend(segmenter.finish());
    tracks
}

/// Concatenates the points of `tracks`, dropping the bridging point that
/// opens each split track.
#[must_use]
pub fn reassemble(tracks: &[Track]) -> Vec<Ping> {
    tracks
        .iter()
        .flat_map(|t| t.points.iter().skip(usize::from(t.split)).copied())
        .collect()
}

/// Reads every shard of `store` in index order.
///
/// # Errors
///
/// Returns the first read or decode error.
pub fn read_shards(store: &ShardStore) -> CoreResult<Vec<Vec<Track>>> {
    store
        .iter()?
        .map(|shard| shard.map(|(_, tracks)| tracks))
        .collect()
}

/// Whether two consecutive points of a track respect the thresholds.
#[must_use]
pub fn within_thresholds(from: &Ping, to: &Ping, config: &Config) -> bool {
    let gap_ok = (to.timestamp - from.timestamp)
        .to_std()
        .map_or(true, |gap| gap <= config.max_time_gap);
    gap_ok && from.distance_to(to) <= config.max_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::memory_store;
    use crate::generators::{ping_stream_strategy, PropTestConfig};
    use proptest::prelude::*;
    use tracksets_core::{build, count_points};

    fn source(pings: &[ObjectPing]) -> Vec<CoreResult<ObjectPing>> {
        pings.iter().cloned().map(Ok).collect()
    }

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn tracks_reassemble_into_stream(pings in ping_stream_strategy(6, 20)) {
            let tracks = segment_all(&pings, &Config::default());
            let expected: Vec<Ping> = pings.iter().map(|p| p.ping).collect();
            prop_assert_eq!(reassemble(&tracks), expected);
        }

        #[test]
        fn tracks_never_mix_objects(pings in ping_stream_strategy(6, 20)) {
            let tracks = segment_all(&pings, &Config::default());
            let mut next = 0;
            for track in &tracks {
                if track.split {
                    prop_assert!(next > 0);
                    prop_assert_eq!(&pings[next - 1].object_id, &track.object_id);
                }
                for input in &pings[next..next + track.own_points()] {
                    prop_assert_eq!(&input.object_id, &track.object_id);
                }
                next += track.own_points();
            }
            prop_assert_eq!(next, pings.len());
        }

        #[test]
        fn track_sizes(pings in ping_stream_strategy(6, 20)) {
            for track in segment_all(&pings, &Config::default()) {
                prop_assert!(!track.is_empty());
                if track.split {
                    prop_assert!(track.len() >= 2);
                }
            }
        }

        #[test]
        fn consecutive_points_within_thresholds(pings in ping_stream_strategy(6, 20)) {
            let config = Config::default();
            for track in segment_all(&pings, &config) {
                for pair in track.points.windows(2) {
                    prop_assert!(within_thresholds(&pair[0], &pair[1], &config));
                }
            }
        }

        #[test]
        fn count_matches_ping_count(
            pings in ping_stream_strategy(6, 20),
            budget in 1usize..40,
        ) {
            let config = Config::default().shard_point_budget(budget);
            let mut store = memory_store();
            let summary = build(source(&pings), &mut store, &config, None).unwrap();

            prop_assert_eq!(summary.pings, pings.len() as u64);
            prop_assert_eq!(count_points(&store).unwrap().total(), pings.len() as u64);
        }

        #[test]
        fn shards_flush_once_budget_reached(
            pings in ping_stream_strategy(6, 20),
            budget in 1usize..40,
        ) {
            let config = Config::default().shard_point_budget(budget);
            let mut store = memory_store();
            build(source(&pings), &mut store, &config, None).unwrap();
            let shards = read_shards(&store).unwrap();

            prop_assert_eq!(shards.is_empty(), pings.is_empty());
            for (i, tracks) in shards.iter().enumerate() {
                prop_assert!(!tracks.is_empty());
                let points: usize = tracks.iter().map(Track::len).sum();
                let last = tracks.last().map_or(0, Track::len);
                prop_assert!(points - last < budget);
                if i + 1 < shards.len() {
                    prop_assert!(points >= budget);
                }
            }
        }

        #[test]
        fn stored_tracks_match_segmenter(
            pings in ping_stream_strategy(6, 20),
            budget in 1usize..40,
        ) {
            let config = Config::default().shard_point_budget(budget);
            let mut store = memory_store();
            build(source(&pings), &mut store, &config, None).unwrap();

            let stored: Vec<Track> = read_shards(&store).unwrap().into_iter().flatten().collect();
            prop_assert_eq!(stored, segment_all(&pings, &config));
        }
    }

    #[test]
    fn reassemble_skips_bridge_point() {
        let a = crate::fixtures::ping_at(0.0, 0.0, 0);
        let b = crate::fixtures::ping_at(0.1, 0.0, 10);
        let c = crate::fixtures::ping_at(0.0, 0.0, 20);
        let tracks = vec![
            Track {
                object_id: "A".into(),
                split: false,
                points: vec![a, b],
            },
            Track::bridged("A", b, c),
        ];
        assert_eq!(reassemble(&tracks), vec![a, b, c]);
    }
}

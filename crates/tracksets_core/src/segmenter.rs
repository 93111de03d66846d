//! The track segmentation engine.
//!
//! The engine consumes pings one at a time, in stream order, and decides
//! for each one whether it continues the open track, opens a fresh track, or
//! opens a split track bridged to its predecessor.
//!
//! ## Decision
//!
//! For an incoming ping, with `last` the previously processed ping:
//!
//! - **new track** if there is no open track, the object id changed, the time
//!   gap is strictly greater than [`Config::max_time_gap`], or the distance
//!   is strictly greater than [`Config::max_distance`].
//! - **returned** if `last` exists and the ping lies inside (edges included)
//!   the envelope of the open track.
//!
//! A new track wins over a return: bridging only happens when the ping
//! returned without a genuine break. After every transition the envelope is
//! widened by the ping.

use crate::config::Config;
use crate::envelope::Envelope;
use crate::types::{Ping, Track};
use std::time::Duration;

/// What the engine does with an incoming ping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Append the ping to the open track.
    Continue,
    /// Close the open track and start a fresh one at this ping.
    Open,
    /// Close the open track and start a split track carrying the given
    /// bridging ping (the previous ping) ahead of this one.
    Bridge(Ping),
}

/// Stateful segmentation engine for one ping stream.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use tracksets_core::{Config, Ping, Segmenter};
///
/// let t0 = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
/// let mut segmenter = Segmenter::new(&Config::default());
///
/// assert!(segmenter.process("A", Ping::new(0.0, 0.0, true, t0)).is_none());
/// let ping = Ping::new(0.05, 0.0, true, t0 + chrono::Duration::seconds(10));
/// assert!(segmenter.process("A", ping).is_none());
///
/// // Back inside the area already covered: the first track closes.
/// let ping = Ping::new(0.0, 0.0, true, t0 + chrono::Duration::seconds(20));
/// let closed = segmenter.process("A", ping).unwrap();
/// assert_eq!(closed.points.len(), 2);
///
/// let last = segmenter.finish().unwrap();
/// assert!(last.split);
/// ```
#[derive(Debug)]
pub struct Segmenter {
    max_time_gap: Duration,
    max_distance: f64,
    current: Option<Track>,
    last: Option<Ping>,
    envelope: Envelope,
}

impl Segmenter {
    /// Creates an engine with the thresholds from `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            max_time_gap: config.max_time_gap,
            max_distance: config.max_distance,
            current: None,
            last: None,
            envelope: Envelope::empty(),
        }
    }

    /// Processes the next ping of the stream.
    ///
    /// Returns the track that this ping closed, if any.
    pub fn process(&mut self, object_id: &str, ping: Ping) -> Option<Track> {
        let closed = match self.classify(object_id, &ping) {
            Transition::Continue => match self.current.as_mut() {
                Some(track) => {
                    track.points.push(ping);
                    None
                }
                None => self.open(object_id, ping),
            },
            Transition::Open => self.open(object_id, ping),
            Transition::Bridge(from) => {
                self.envelope = Envelope::from_point(&from);
                self.current.replace(Track::bridged(object_id, from, ping))
            }
        };

        self.envelope.expand(&ping);
        self.last = Some(ping);

        closed
    }

    /// Decides what [`Segmenter::process`] would do with `ping`, without
    /// changing any state.
    #[must_use]
    pub fn classify(&self, object_id: &str, ping: &Ping) -> Transition {
        let Some(last) = self.last else {
            return Transition::Open;
        };

        let new_track = match &self.current {
            Some(track) => {
                track.object_id != object_id
                    || self.exceeds_time_gap(&last, ping)
                    || last.distance_to(ping) > self.max_distance
            }
            None => true,
        };
        let returned = self.envelope.contains(ping);

        match (new_track, returned) {
            (true, _) => Transition::Open,
            (false, true) => Transition::Bridge(last),
            (false, false) => Transition::Continue,
        }
    }

    /// Closes and returns the open track at end of stream.
    ///
    /// Returns `None` only if no ping was processed since the last call.
    pub fn finish(&mut self) -> Option<Track> {
        self.envelope = Envelope::empty();
        self.current.take()
    }

    /// The open track, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// The most recently processed ping.
    #[must_use]
    pub fn last_ping(&self) -> Option<&Ping> {
        self.last.as_ref()
    }

    /// The envelope of the open track.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn open(&mut self, object_id: &str, ping: Ping) -> Option<Track> {
        self.envelope = Envelope::empty();
        self.current.replace(Track::open(object_id, ping))
    }

    fn exceeds_time_gap(&self, last: &Ping, ping: &Ping) -> bool {
        // Negative gaps (out-of-order input) never break a track.
        ping.timestamp
            .signed_duration_since(last.timestamp)
            .to_std()
            .is_ok_and(|gap| gap > self.max_time_gap)
    }
}

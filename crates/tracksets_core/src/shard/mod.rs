//! Shard buffering and typed shard access.
//!
//! Closed tracks are collected in a [`ShardBuffer`] and flushed to a
//! [`ShardStore`] once the buffered point count reaches the configured
//! budget. The check only happens between whole tracks, so a shard may
//! exceed the budget by up to one track.

mod buffer;
mod store;

pub use buffer::ShardBuffer;
pub use store::{ShardInfo, ShardStore};
pub use tracksets_storage::ShardIndex;

//! # Tracksets Codec
//!
//! Shard file encoding for tracksets.
//!
//! A shard file is a framed CBOR array:
//!
//! ```text
//! | magic "TRKS" (4) | version (2) | item_count (4) | payload_len (4) | payload (N) | crc32 (4) |
//! ```
//!
//! All integers are little-endian. The checksum covers every byte before it.
//! The payload is the CBOR encoding of the item sequence; the codec is
//! generic over any `serde` type so it stays independent of the track model.
//!
//! ## Usage
//!
//! ```
//! use tracksets_codec::{decode_shard, encode_shard};
//!
//! let items = vec![(1.5_f64, true), (2.25, false)];
//! let bytes = encode_shard(&items).unwrap();
//! let decoded: Vec<(f64, bool)> = decode_shard(&bytes).unwrap();
//! assert_eq!(items, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cbor;
mod crc;
mod error;
mod shard;

pub use cbor::{from_cbor, to_cbor};
pub use crc::compute_crc32;
pub use error::{CodecError, CodecResult};
pub use shard::{
    decode_shard, encode_shard, peek_header, ShardHeader, SHARD_HEADER_SIZE, SHARD_MAGIC,
    SHARD_VERSION,
};

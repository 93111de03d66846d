//! Shard file framing.

use crate::cbor::{from_cbor, to_cbor};
use crate::crc::compute_crc32;
use crate::error::{CodecError, CodecResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Magic bytes at the start of every shard file.
pub const SHARD_MAGIC: [u8; 4] = *b"TRKS";

/// Current shard format version.
pub const SHARD_VERSION: u16 = 1;

/// Header size: magic (4) + version (2) + item_count (4) + payload_len (4) = 14
pub const SHARD_HEADER_SIZE: usize = 14;

const CRC_SIZE: usize = 4;

/// Fixed-size header of a shard file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardHeader {
    /// Format version the shard was written with.
    pub version: u16,
    /// Number of items (tracks) in the payload.
    pub item_count: u32,
    /// Length of the CBOR payload in bytes.
    pub payload_len: u32,
}

impl ShardHeader {
    /// Total encoded length of a shard with this header.
    #[must_use]
    pub fn file_len(&self) -> usize {
        SHARD_HEADER_SIZE + self.payload_len as usize + CRC_SIZE
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&SHARD_MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.item_count.to_le_bytes());
        buf.extend_from_slice(&self.payload_len.to_le_bytes());
    }
}

/// Encodes `items` as a complete shard file.
///
/// # Errors
///
/// Returns an error if serialization fails or the shard exceeds the
/// 32-bit count and length fields.
pub fn encode_shard<T: Serialize>(items: &[T]) -> CodecResult<Vec<u8>> {
    let payload = to_cbor(items)?;

    let header = ShardHeader {
        version: SHARD_VERSION,
        item_count: u32::try_from(items.len()).map_err(|_| CodecError::TooLarge(items.len()))?,
        payload_len: u32::try_from(payload.len())
            .map_err(|_| CodecError::TooLarge(items.len()))?,
    };

    let mut buf = Vec::with_capacity(header.file_len());
    header.encode_into(&mut buf);
    buf.extend_from_slice(&payload);

    let crc = compute_crc32(&buf);
    buf.extend_from_slice(&crc.to_le_bytes());

    Ok(buf)
}

/// Reads and validates the header without decoding the payload.
///
/// The checksum is not verified; use [`decode_shard`] for that.
///
/// # Errors
///
/// Returns an error if the magic, version or lengths are invalid.
pub fn peek_header(data: &[u8]) -> CodecResult<ShardHeader> {
    if data.len() < SHARD_HEADER_SIZE {
        return Err(CodecError::UnexpectedEof {
            needed: SHARD_HEADER_SIZE,
            available: data.len(),
        });
    }

    if data[0..4] != SHARD_MAGIC {
        return Err(CodecError::InvalidMagic);
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version > SHARD_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let item_count = u32::from_le_bytes([data[6], data[7], data[8], data[9]]);
    let payload_len = u32::from_le_bytes([data[10], data[11], data[12], data[13]]);

    let header = ShardHeader {
        version,
        item_count,
        payload_len,
    };

    if data.len() < header.file_len() {
        return Err(CodecError::UnexpectedEof {
            needed: header.file_len(),
            available: data.len(),
        });
    }

    Ok(header)
}

/// Decodes a complete shard file, verifying its checksum.
///
/// # Errors
///
/// Returns an error if the header is invalid, the checksum does not match,
/// or the payload does not decode to exactly `item_count` items.
pub fn decode_shard<T: DeserializeOwned>(data: &[u8]) -> CodecResult<Vec<T>> {
    let header = peek_header(data)?;

    let crc_offset = SHARD_HEADER_SIZE + header.payload_len as usize;
    let stored = u32::from_le_bytes([
        data[crc_offset],
        data[crc_offset + 1],
        data[crc_offset + 2],
        data[crc_offset + 3],
    ]);
    let computed = compute_crc32(&data[..crc_offset]);
    if stored != computed {
        return Err(CodecError::ChecksumMismatch {
            expected: stored,
            actual: computed,
        });
    }

    let items: Vec<T> = from_cbor(&data[SHARD_HEADER_SIZE..crc_offset])?;
    if items.len() != header.item_count as usize {
        return Err(CodecError::CountMismatch {
            expected: header.item_count,
            actual: items.len(),
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<f64>,
        flag: bool,
    }

    fn samples() -> Vec<Sample> {
        vec![
            Sample {
                name: "a".into(),
                values: vec![0.05, 12.5],
                flag: false,
            },
            Sample {
                name: "b".into(),
                values: vec![],
                flag: true,
            },
        ]
    }

    #[test]
    fn header_layout() {
        let bytes = encode_shard(&samples()).unwrap();

        assert_eq!(&bytes[0..4], b"TRKS");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), SHARD_VERSION);
        assert_eq!(u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]), 2);

        let header = peek_header(&bytes).unwrap();
        assert_eq!(header.item_count, 2);
        assert_eq!(header.file_len(), bytes.len());
    }

    #[test]
    fn decode_returns_items_in_order() {
        let items = samples();
        let bytes = encode_shard(&items).unwrap();
        let decoded: Vec<Sample> = decode_shard(&bytes).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn empty_shard() {
        let bytes = encode_shard::<Sample>(&[]).unwrap();
        let decoded: Vec<Sample> = decode_shard(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn flipped_payload_byte_fails_checksum() {
        let mut bytes = encode_shard(&samples()).unwrap();
        bytes[SHARD_HEADER_SIZE + 3] ^= 0x40;

        let result: CodecResult<Vec<Sample>> = decode_shard(&bytes);
        assert!(matches!(result, Err(CodecError::ChecksumMismatch { .. })));
    }

    #[test]
    fn truncated_file() {
        let bytes = encode_shard(&samples()).unwrap();

        let result: CodecResult<Vec<Sample>> = decode_shard(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(CodecError::UnexpectedEof { .. })));

        let result = peek_header(&bytes[..5]);
        assert!(matches!(result, Err(CodecError::UnexpectedEof { .. })));
    }

    #[test]
    fn wrong_magic() {
        let mut bytes = encode_shard(&samples()).unwrap();
        bytes[0] = b'X';
        assert_eq!(peek_header(&bytes), Err(CodecError::InvalidMagic));
    }

    #[test]
    fn newer_version_rejected() {
        let mut bytes = encode_shard(&samples()).unwrap();
        bytes[4..6].copy_from_slice(&(SHARD_VERSION + 1).to_le_bytes());
        assert_eq!(
            peek_header(&bytes),
            Err(CodecError::UnsupportedVersion(SHARD_VERSION + 1))
        );
    }

    #[test]
    fn count_mismatch_detected() {
        let mut bytes = encode_shard(&samples()).unwrap();
        bytes[6..10].copy_from_slice(&5u32.to_le_bytes());
        let crc_offset = bytes.len() - 4;
        let crc = compute_crc32(&bytes[..crc_offset]);
        bytes[crc_offset..].copy_from_slice(&crc.to_le_bytes());

        let result: CodecResult<Vec<Sample>> = decode_shard(&bytes);
        assert!(matches!(
            result,
            Err(CodecError::CountMismatch {
                expected: 5,
                actual: 2
            })
        ));
    }
}

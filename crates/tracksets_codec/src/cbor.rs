//! CBOR serialization helpers over `ciborium`.

use crate::error::{CodecError, CodecResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value to CBOR bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_cbor<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    let mut buffer = Vec::new();
    ciborium::into_writer(value, &mut buffer)
        .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
    Ok(buffer)
}

/// Decode a value from CBOR bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid CBOR for `T`.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_survive_exactly() {
        let values = vec![0.1_f64, -45.123_456_789, f64::MIN_POSITIVE, 1e300];
        let bytes = to_cbor(&values).unwrap();
        let decoded: Vec<f64> = from_cbor(&bytes).unwrap();
        assert_eq!(values, decoded);
    }

    #[test]
    fn garbage_is_rejected() {
        let result: CodecResult<Vec<String>> = from_cbor(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CodecError::DecodingFailed { .. })));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let bytes = to_cbor(&"text").unwrap();
        let result: CodecResult<u32> = from_cbor(&bytes);
        assert!(result.is_err());
    }
}

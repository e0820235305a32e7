//! Range validation of candidate values against a property spec.
//!
//! Validation only reports; it never clamps or mutates the candidate.
//!
//! | format  | valid when                                    |
//! |---------|-----------------------------------------------|
//! | String  | 1 to 192 bytes                                |
//! | BitSet  | 1 to 4 bytes                                  |
//! | Boolean | exactly one byte, 0x00 or 0x01                |
//! | Numeric | 1 to 4 bytes and `min <= value <= max`        |
//!
//! Numeric values are little-endian: the given bytes occupy the low-order
//! positions of a 32-bit integer and the missing high-order bytes are zero.

use crate::limits::{
    BOOL_FALSE, BOOL_LEN, BOOL_TRUE, MAX_BITSET_LEN, MAX_NUMERIC_LEN, MAX_STRING_LEN,
};
use crate::model::{Format, PropertySpec};
use crate::value::ByteValue;

/// Decodes a 1 to 4 byte little-endian numeric value.
///
/// Missing high-order bytes are zero-filled, so only 4-byte encodings can
/// carry a negative number. Returns `None` for empty or over-long input.
pub fn decode_numeric(bytes: &[u8]) -> Option<i32> {
    if bytes.is_empty() || bytes.len() > MAX_NUMERIC_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_NUMERIC_LEN];
    buf[..bytes.len()].copy_from_slice(bytes);
    Some(i32::from_le_bytes(buf))
}

/// Returns true if `value` is a legal value for `spec`.
pub fn is_within_range(spec: &PropertySpec, value: &ByteValue) -> bool {
    // Snapshot first: `value` may be one of the spec's own bounds, and
    // bound decodes below take their own locks.
    let bytes = value.bytes();
    if bytes.is_empty() {
        return false;
    }

    match spec.format() {
        Format::String => bytes.len() <= MAX_STRING_LEN,
        Format::BitSet => bytes.len() <= MAX_BITSET_LEN,
        Format::Boolean => {
            bytes.len() == BOOL_LEN && (bytes[0] == BOOL_FALSE || bytes[0] == BOOL_TRUE)
        }
        Format::Numeric => {
            let Some(n) = decode_numeric(&bytes) else {
                return false;
            };
            let min = decode_bound(spec.min_val());
            let max = decode_bound(spec.max_val());
            min <= n && n <= max
        }
    }
}

/// A bound that is not a valid numeric encoding decodes as zero.
fn decode_bound(bound: &ByteValue) -> i32 {
    bound.with_bytes(decode_numeric).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Permission, Resolution};

    fn spec(min: &[u8], max: &[u8]) -> PropertySpec {
        PropertySpec::create(Permission::ReadWrite, Resolution::X1, min, min, max).unwrap()
    }

    fn value(bytes: &[u8]) -> ByteValue {
        ByteValue::create(bytes).unwrap()
    }

    #[test]
    fn test_decode_numeric() {
        assert_eq!(decode_numeric(&[]), None);
        assert_eq!(decode_numeric(&[0x0A]), Some(10));
        assert_eq!(decode_numeric(&[0x00, 0x04]), Some(1024));
        assert_eq!(decode_numeric(&[0xFF, 0xFF, 0xFF]), Some(0x00FF_FFFF));
        assert_eq!(decode_numeric(&[0xF6, 0xFF, 0xFF, 0xFF]), Some(-10));
        assert_eq!(decode_numeric(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn test_decode_numeric_zero_extends() {
        // A single 0xFF byte is 255, not -1
        assert_eq!(decode_numeric(&[0xFF]), Some(255));
        assert_eq!(decode_numeric(&[0xFF, 0xFF]), Some(65535));
    }

    #[test]
    fn test_empty_value_never_valid() {
        assert!(!is_within_range(&spec(&[], &[]), &ByteValue::empty()));
        assert!(!is_within_range(&spec(&[], &[5]), &ByteValue::empty()));
        assert!(!is_within_range(&spec(&[0], &[1]), &ByteValue::empty()));
        assert!(!is_within_range(&spec(&[0], &[10]), &ByteValue::empty()));
    }

    #[test]
    fn test_string_limit() {
        let s = spec(&[], &[]);
        assert!(is_within_range(&s, &value(b"a")));
        assert!(is_within_range(&s, &value(&[b'x'; MAX_STRING_LEN])));
        assert!(!is_within_range(&s, &value(&[b'x'; MAX_STRING_LEN + 1])));
    }

    #[test]
    fn test_bitset_limit() {
        let s = spec(&[], &[5]);
        assert!(is_within_range(&s, &value(&[0xFF])));
        assert!(is_within_range(&s, &value(&[1, 2, 3, 4])));
        assert!(!is_within_range(&s, &value(&[1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_boolean() {
        let s = spec(&[0], &[1]);
        assert!(is_within_range(&s, &value(&[0x00])));
        assert!(is_within_range(&s, &value(&[0x01])));
        assert!(!is_within_range(&s, &value(&[0x02])));
        assert!(!is_within_range(&s, &value(&[0x00, 0x00])));
    }

    #[test]
    fn test_numeric_signed_range() {
        let s = spec(&(-10i32).to_le_bytes(), &10i32.to_le_bytes());
        assert_eq!(s.format(), Format::Numeric);
        for n in [-10i32, 0, 10] {
            assert!(is_within_range(&s, &value(&n.to_le_bytes())), "{n}");
        }
        for n in [-11i32, 11] {
            assert!(!is_within_range(&s, &value(&n.to_le_bytes())), "{n}");
        }
    }

    #[test]
    fn test_numeric_short_encodings() {
        let s = spec(&[0], &[10]);
        assert!(is_within_range(&s, &value(&[0])));
        assert!(is_within_range(&s, &value(&[10])));
        assert!(is_within_range(&s, &value(&[10, 0])));
        assert!(!is_within_range(&s, &value(&[11])));
        assert!(!is_within_range(&s, &value(&[10, 1])));
        assert!(!is_within_range(&s, &value(&[1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_numeric_bound_without_encoding_is_zero() {
        // min present, max absent: Numeric with max decoding as 0
        let s = spec(&[0], &[]);
        assert_eq!(s.format(), Format::Numeric);
        assert!(is_within_range(&s, &value(&[0])));
        assert!(!is_within_range(&s, &value(&[1])));
    }

    #[test]
    fn test_bound_as_candidate() {
        let s = spec(&[0], &[10]);
        assert!(is_within_range(&s, s.min_val()));
        assert!(is_within_range(&s, s.max_val()));
    }
}

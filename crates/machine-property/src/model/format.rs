//! Structural kinds of property values.

use std::fmt;

use crate::limits::{BOOL_FALSE, BOOL_TRUE};

/// Structural kind of a property value, stored in 2 bits.
///
/// The format is never chosen directly: it is inferred from the shape of a
/// spec's bounds by [`Format::from_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Format {
    /// Signed integer of 1 to 4 bytes, little-endian.
    Numeric = 0,
    /// Single byte, 0x00 or 0x01.
    Boolean = 1,
    /// Unsigned bit set of 1 to 4 bytes; the maximum is the mask of defined bits.
    BitSet = 2,
    /// 1 to 192 bytes of text.
    String = 3,
}

impl Format {
    /// Number of bits used to store a format.
    pub const BITS: u8 = 2;

    const MASK: u8 = (1 << Self::BITS) - 1;

    /// Decodes a format from the low 2 bits of `raw`.
    pub fn from_raw(raw: u8) -> Format {
        match raw & Self::MASK {
            0 => Format::Numeric,
            1 => Format::Boolean,
            2 => Format::BitSet,
            _ => Format::String,
        }
    }

    /// Creates a Format from its exact code, rejecting out-of-range codes.
    pub fn from_u8(v: u8) -> Option<Format> {
        (v <= Self::MASK).then(|| Self::from_raw(v))
    }

    /// Infers the format from the bounds of a spec.
    ///
    /// | min len | max len | condition           | format  |
    /// |---------|---------|---------------------|---------|
    /// | 0       | 0       |                     | String  |
    /// | 0       | > 0     |                     | BitSet  |
    /// | 1       | 1       | min = 0 and max = 1 | Boolean |
    /// | otherwise         |                     | Numeric |
    ///
    /// Rows are tried in order, so a `{0, 1}` pair is always Boolean.
    pub fn from_bounds(min: &[u8], max: &[u8]) -> Format {
        match (min, max) {
            ([], []) => Format::String,
            ([], _) => Format::BitSet,
            ([BOOL_FALSE], [BOOL_TRUE]) => Format::Boolean,
            _ => Format::Numeric,
        }
    }

    /// Returns the lowercase name of this format.
    pub fn name(self) -> &'static str {
        match self {
            Format::Numeric => "numeric",
            Format::Boolean => "boolean",
            Format::BitSet => "bitset",
            Format::String => "string",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

//! Decimal resolution of numeric property values.

use std::fmt;

/// Decimal scale of a numeric value, stored in 3 bits.
///
/// ```text
/// bit2 bit1 bit0
///   ^    ^    ^
///   |    |    '-- coefficient (0 = x1, 1 = x5)
///   '----'------- exponent N, 2-bit two's complement (scale = coeff * 10^N)
/// ```
///
/// A temperature of 25.5 with resolution `X0_5` is stored as the raw
/// integer 51. The resolution only affects how raw values are presented;
/// stored bytes are never rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Resolution {
    /// 1 x 10^0
    X1 = 0b000,
    /// 5 x 10^0
    X5 = 0b001,
    /// 1 x 10^1
    X10 = 0b010,
    /// 5 x 10^1
    X50 = 0b011,
    /// 1 x 10^-2
    X0_01 = 0b100,
    /// 5 x 10^-2
    X0_05 = 0b101,
    /// 1 x 10^-1
    X0_1 = 0b110,
    /// 5 x 10^-1
    X0_5 = 0b111,
}

impl Resolution {
    /// Number of bits used to store a resolution.
    pub const BITS: u8 = 3;

    const MASK: u8 = (1 << Self::BITS) - 1;

    /// Decodes a resolution from the low 3 bits of `raw`.
    pub fn from_raw(raw: u8) -> Resolution {
        match raw & Self::MASK {
            0b000 => Resolution::X1,
            0b001 => Resolution::X5,
            0b010 => Resolution::X10,
            0b011 => Resolution::X50,
            0b100 => Resolution::X0_01,
            0b101 => Resolution::X0_05,
            0b110 => Resolution::X0_1,
            _ => Resolution::X0_5,
        }
    }

    /// Creates a Resolution from its exact code, rejecting out-of-range codes.
    pub fn from_u8(v: u8) -> Option<Resolution> {
        (v <= Self::MASK).then(|| Self::from_raw(v))
    }

    /// Returns the coefficient, 1 or 5.
    pub fn coefficient(self) -> u8 {
        if (self as u8) & 0b1 != 0 { 5 } else { 1 }
    }

    /// Returns the power-of-ten exponent, -2 to +1.
    pub fn exponent(self) -> i8 {
        // Sign-extend the 2-bit field: 00 -> 0, 01 -> +1, 10 -> -2, 11 -> -1
        let bits = ((self as u8) >> 1) & 0b11;
        ((bits << 6) as i8) >> 6
    }

    /// Returns `coefficient * 10^exponent` as a float.
    ///
    /// Integer code can use [`coefficient`](Self::coefficient) and
    /// [`exponent`](Self::exponent) instead.
    pub fn scale_factor(self) -> f64 {
        apply_exponent(self.coefficient() as f64, self.exponent())
    }

    /// Scales a raw integer exactly.
    ///
    /// Returns `(mantissa, exponent)` with
    /// `real value = mantissa * 10^exponent`.
    pub fn scale_exact(self, raw: i32) -> (i64, i8) {
        (raw as i64 * self.coefficient() as i64, self.exponent())
    }

    /// Converts a raw integer to its real-world magnitude.
    pub fn to_real(self, raw: i32) -> f64 {
        let (mantissa, exponent) = self.scale_exact(raw);
        apply_exponent(mantissa as f64, exponent)
    }

    /// Returns the name of this resolution, e.g. `x0.5`.
    pub fn name(self) -> &'static str {
        match self {
            Resolution::X1 => "x1",
            Resolution::X5 => "x5",
            Resolution::X10 => "x10",
            Resolution::X50 => "x50",
            Resolution::X0_01 => "x0.01",
            Resolution::X0_05 => "x0.05",
            Resolution::X0_1 => "x0.1",
            Resolution::X0_5 => "x0.5",
        }
    }
}

/// Computes `value * 10^exponent`, dividing for negative exponents so that
/// results like `255 * 10^-1` round correctly.
fn apply_exponent(value: f64, exponent: i8) -> f64 {
    let pow = 10f64.powi(exponent.unsigned_abs() as i32);
    if exponent < 0 { value / pow } else { value * pow }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

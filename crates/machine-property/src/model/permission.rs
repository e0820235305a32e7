//! Access permission of property values.

use std::fmt;

/// Access permission of a property value, stored in 2 bits.
///
/// Bit 1 grants read access, bit 0 grants write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Permission {
    None = 0b00,
    WriteOnly = 0b01,
    ReadOnly = 0b10,
    ReadWrite = 0b11,
}

impl Permission {
    /// Number of bits used to store a permission.
    pub const BITS: u8 = 2;

    const MASK: u8 = (1 << Self::BITS) - 1;
    const READ: u8 = 0b10;
    const WRITE: u8 = 0b01;

    /// Decodes a permission from the low 2 bits of `raw`.
    pub fn from_raw(raw: u8) -> Permission {
        match raw & Self::MASK {
            0b00 => Permission::None,
            0b01 => Permission::WriteOnly,
            0b10 => Permission::ReadOnly,
            _ => Permission::ReadWrite,
        }
    }

    /// Creates a Permission from its exact code, rejecting out-of-range codes.
    pub fn from_u8(v: u8) -> Option<Permission> {
        (v <= Self::MASK).then(|| Self::from_raw(v))
    }

    /// Returns true if the value may be read.
    pub fn can_read(self) -> bool {
        (self as u8) & Self::READ != 0
    }

    /// Returns true if the value may be written.
    pub fn can_write(self) -> bool {
        (self as u8) & Self::WRITE != 0
    }

    /// Returns the lowercase name of this permission.
    pub fn name(self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::WriteOnly => "write-only",
            Permission::ReadOnly => "read-only",
            Permission::ReadWrite => "read-write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

//! Human-readable rendering of raw byte sequences.

use std::fmt;

/// Writes bytes as a bracketed list of uppercase hex literals.
///
/// `[0xA5, 0xE7, 0x00, 0xFF]` renders as `[ 0xA5 0xE7 0x00 0xFF ]`; an empty
/// slice renders as `[ ]`.
pub fn write_bytes<W: fmt::Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    out.write_char('[')?;
    for byte in bytes {
        write!(out, " 0x{:02X}", byte)?;
    }
    out.write_str(" ]")
}

/// Formats bytes as a bracketed list of uppercase hex literals.
pub fn format_bytes(bytes: &[u8]) -> String {
    // "[ ]" plus " 0xNN" per byte
    let mut s = String::with_capacity(3 + bytes.len() * 5);
    // Writing to a String cannot fail
    let _ = write_bytes(&mut s, bytes);
    s
}

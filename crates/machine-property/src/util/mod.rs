//! Utility modules.

pub mod bytes;

pub use bytes::{format_bytes, write_bytes};

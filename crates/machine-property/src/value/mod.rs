//! Variable-length byte values.
//!
//! A [`ByteValue`] holds 0 to 255 bytes. Values of up to
//! [`INLINE_CAPACITY`](crate::limits::INLINE_CAPACITY) bytes live inline; longer
//! values own a heap buffer. Every instance carries its own spin lock, so
//! values can be shared between threads without further synchronization.
//!
//! [`ByteValue`] is immutable to its users. [`MutableByteValue`] adds the
//! mutation API (`set`, `take`, `assign_from`).

mod byte_value;
mod lock;
mod storage;

pub use byte_value::{ByteValue, MutableByteValue};

#[cfg(test)]
pub(crate) use storage::fault as storage_fault;

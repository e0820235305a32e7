//! Inline-or-heap byte storage.
//!
//! [`Buffer`] is the unlocked state behind a `ByteValue`. Callers hold the
//! owning instance's lock before touching it.

use std::mem;

use crate::error::ValueError;
use crate::limits::{INLINE_CAPACITY, MAX_VALUE_LEN};

/// Where the bytes of a value live.
#[derive(Debug)]
enum Storage {
    /// Up to `INLINE_CAPACITY` bytes, zero-padded.
    Inline([u8; INLINE_CAPACITY]),
    /// A heap buffer at least `len` bytes long.
    Heap(Box<[u8]>),
}

/// Length plus storage. `len <= INLINE_CAPACITY` iff the storage is inline.
#[derive(Debug)]
pub(crate) struct Buffer {
    len: u8,
    storage: Storage,
}

impl Buffer {
    /// An empty buffer with a zeroed inline area.
    pub(crate) const fn empty() -> Self {
        Self {
            len: 0,
            storage: Storage::Inline([0; INLINE_CAPACITY]),
        }
    }

    /// Returns the number of stored bytes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns the stored bytes.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        let len = self.len as usize;
        match &self.storage {
            Storage::Inline(bytes) => &bytes[..len],
            Storage::Heap(bytes) => &bytes[..len],
        }
    }

    /// Returns the size of the heap allocation, if any.
    pub(crate) fn heap_capacity(&self) -> Option<usize> {
        match &self.storage {
            Storage::Inline(_) => None,
            Storage::Heap(bytes) => Some(bytes.len()),
        }
    }

    /// Releases any heap allocation and resets to empty.
    pub(crate) fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Moves the contents out, leaving this buffer empty.
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Replaces the contents with a copy of `data`.
    ///
    /// An existing heap allocation is reused when `data` still needs heap
    /// storage and fits in it. Over-long `data` is rejected with the contents
    /// unchanged; a failed allocation leaves the buffer empty.
    pub(crate) fn set(&mut self, data: &[u8]) -> Result<(), ValueError> {
        let len = data.len();
        if len > MAX_VALUE_LEN {
            return Err(ValueError::LengthExceedsLimit {
                len,
                max: MAX_VALUE_LEN,
            });
        }

        if len <= INLINE_CAPACITY {
            let mut inline = [0u8; INLINE_CAPACITY];
            inline[..len].copy_from_slice(data);
            // Drops the previous heap buffer, if any
            self.storage = Storage::Inline(inline);
        } else if self.heap_capacity().is_some_and(|cap| cap >= len) {
            if let Storage::Heap(bytes) = &mut self.storage {
                bytes[..len].copy_from_slice(data);
            }
        } else {
            self.clear();
            let mut bytes = allocate(len)?;
            bytes.copy_from_slice(data);
            self.storage = Storage::Heap(bytes);
        }

        // len <= MAX_VALUE_LEN was checked above
        self.len = len as u8;
        Ok(())
    }
}

/// Allocates a zeroed heap buffer of exactly `len` bytes without aborting on
/// exhaustion.
fn allocate(len: usize) -> Result<Box<[u8]>, ValueError> {
    #[cfg(test)]
    if fault::should_fail() {
        return Err(ValueError::AllocationFailed { len });
    }

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| ValueError::AllocationFailed { len })?;
    bytes.resize(len, 0);
    Ok(bytes.into_boxed_slice())
}

/// Allocation fault injection for tests.
#[cfg(test)]
pub(crate) mod fault {
    use std::cell::Cell;

    thread_local! {
        static FAIL_NEXT: Cell<bool> = const { Cell::new(false) };
    }

    /// Makes the next heap allocation on this thread fail.
    pub(crate) fn fail_next_allocation() {
        FAIL_NEXT.with(|f| f.set(true));
    }

    pub(super) fn should_fail() -> bool {
        FAIL_NEXT.with(|f| f.replace(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_and_heap_modes() {
        let mut buf = Buffer::empty();
        buf.set(&[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.heap_capacity(), None);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);

        buf.set(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buf.heap_capacity(), Some(5));
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_inline_area_zero_padded() {
        let mut buf = Buffer::empty();
        buf.set(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
        buf.set(&[0x01]).unwrap();
        match &buf.storage {
            Storage::Inline(bytes) => assert_eq!(bytes, &[0x01, 0, 0, 0]),
            Storage::Heap(_) => panic!("expected inline storage"),
        }
    }

    #[test]
    fn test_heap_reused_when_it_fits() {
        let mut buf = Buffer::empty();
        buf.set(&[7u8; 10]).unwrap();
        buf.set(&[8u8; 6]).unwrap();
        assert_eq!(buf.heap_capacity(), Some(10));
        assert_eq!(buf.as_slice(), &[8u8; 6]);
    }

    #[test]
    fn test_heap_reallocated_when_growing() {
        let mut buf = Buffer::empty();
        buf.set(&[7u8; 6]).unwrap();
        buf.set(&[8u8; 20]).unwrap();
        assert_eq!(buf.heap_capacity(), Some(20));
        assert_eq!(buf.as_slice(), &[8u8; 20]);
    }

    #[test]
    fn test_failed_growth_leaves_empty() {
        let mut buf = Buffer::empty();
        buf.set(&[1, 2, 3]).unwrap();

        fault::fail_next_allocation();
        let result = buf.set(&[9u8; 32]);

        assert_eq!(result, Err(ValueError::AllocationFailed { len: 32 }));
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.heap_capacity(), None);
    }

    #[test]
    fn test_too_long_keeps_contents() {
        let mut buf = Buffer::empty();
        buf.set(&[1, 2, 3, 4, 5, 6]).unwrap();

        let result = buf.set(&[0u8; 256]);
        assert!(matches!(result, Err(ValueError::LengthExceedsLimit { len: 256, max: 255 })));
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.heap_capacity(), Some(6));
    }

    #[test]
    fn test_take_leaves_donor_empty() {
        let mut donor = Buffer::empty();
        donor.set(&[5u8; 40]).unwrap();

        let taken = donor.take();
        assert_eq!(taken.as_slice(), &[5u8; 40]);
        assert_eq!(donor.len(), 0);
        assert_eq!(donor.heap_capacity(), None);
    }
}

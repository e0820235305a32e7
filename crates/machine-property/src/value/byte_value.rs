//! The lock-protected value types.

use std::cell::UnsafeCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::ptr;

use crate::error::ValueError;
use crate::limits::{INLINE_CAPACITY, MAX_VALUE_LEN};
use crate::util::write_bytes;
use crate::value::lock::{SpinGuard, SpinLock};
use crate::value::storage::Buffer;

/// An opaque value of 0 to 255 bytes.
///
/// Values of up to 4 bytes are stored inline; longer values own a heap
/// buffer of their own. No buffer is ever shared between two instances.
///
/// `ByteValue` is not `Clone`: copies go through [`ByteValue::try_clone`],
/// which reports allocation failure instead of aborting.
///
/// Equality and ordering are by content. Shorter values order before longer
/// ones; values of equal length compare lexicographically.
///
/// # Thread Safety
///
/// Every public method holds the instance's spin lock for its whole
/// duration. Comparisons between two instances lock both in address order.
/// [`ByteValue::with_bytes`] runs its closure under the lock, so the closure
/// must not call back into the same instance.
pub struct ByteValue {
    lock: SpinLock,
    buf: UnsafeCell<Buffer>,
}

// SAFETY: `buf` is only reached through `locked`/`locked_pair`, which hold
// the instance's lock for the lifetime of the reference they hand out, or
// through `&mut self`, which is exclusive.
unsafe impl Sync for ByteValue {}

impl ByteValue {
    /// Creates a value holding a copy of `data`.
    ///
    /// Fails if `data` is longer than 255 bytes or heap storage cannot be
    /// allocated.
    pub fn create(data: &[u8]) -> Result<Self, ValueError> {
        let mut buf = Buffer::empty();
        match buf.set(data) {
            Ok(()) => Ok(Self::from_buffer(buf)),
            Err(e) => {
                #[cfg(feature = "logging")]
                log::warn!("failed to create {}-byte value: {}", data.len(), e);
                Err(e)
            }
        }
    }

    /// Creates an empty value.
    pub const fn empty() -> Self {
        Self::from_buffer(Buffer::empty())
    }

    const fn from_buffer(buf: Buffer) -> Self {
        Self {
            lock: SpinLock::new(),
            buf: UnsafeCell::new(buf),
        }
    }

    /// Creates an independent copy of this value.
    pub fn try_clone(&self) -> Result<Self, ValueError> {
        let mut copy = Buffer::empty();
        let result = self.locked(|buf| copy.set(buf.as_slice()));
        match result {
            Ok(()) => Ok(Self::from_buffer(copy)),
            Err(e) => {
                #[cfg(feature = "logging")]
                log::warn!("failed to clone value: {}", e);
                Err(e)
            }
        }
    }

    /// Returns the number of bytes held.
    pub fn len(&self) -> usize {
        self.locked(|buf| buf.len())
    }

    /// Returns true if the value holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the bytes are stored inline (no heap allocation).
    pub fn is_inline(&self) -> bool {
        self.locked(|buf| buf.len() <= INLINE_CAPACITY)
    }

    /// Returns a snapshot copy of the bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.locked(|buf| buf.as_slice().to_vec())
    }

    /// Runs `f` on the bytes while holding the lock.
    ///
    /// `f` must not call any method of this same instance; the lock is not
    /// reentrant and doing so spins forever.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.locked(|buf| f(buf.as_slice()))
    }

    /// Copies the bytes onto the stack, so they can be used after the lock
    /// is released without a heap allocation.
    fn snapshot(&self) -> ([u8; MAX_VALUE_LEN], usize) {
        let mut out = [0u8; MAX_VALUE_LEN];
        let len = self.locked(|buf| {
            let bytes = buf.as_slice();
            out[..bytes.len()].copy_from_slice(bytes);
            bytes.len()
        });
        (out, len)
    }

    #[cfg(test)]
    pub(crate) fn heap_capacity(&self) -> Option<usize> {
        self.locked(|buf| buf.heap_capacity())
    }

    fn locked<R>(&self, f: impl FnOnce(&mut Buffer) -> R) -> R {
        let _guard = SpinGuard::one(&self.lock);
        // SAFETY: the lock is held until `_guard` drops, after `f` returns
        let buf = unsafe { &mut *self.buf.get() };
        f(buf)
    }

    /// Locks both instances and runs `f` on their buffers.
    ///
    /// `other` is `None` when both sides are the same instance.
    fn locked_pair<R>(&self, other: &Self, f: impl FnOnce(&mut Buffer, Option<&mut Buffer>) -> R) -> R {
        let _guard = SpinGuard::pair(&self.lock, &other.lock);
        // SAFETY: both locks are held until `_guard` drops; the two buffers
        // are distinct allocations unless `self` and `other` are the same
        // instance, in which case only one reference is created.
        unsafe {
            let a = &mut *self.buf.get();
            if ptr::eq(self, other) {
                f(a, None)
            } else {
                f(a, Some(&mut *other.buf.get()))
            }
        }
    }
}

impl Default for ByteValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<&[u8]> for ByteValue {
    type Error = ValueError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::create(data)
    }
}

impl PartialEq for ByteValue {
    fn eq(&self, other: &Self) -> bool {
        self.locked_pair(other, |a, b| match b {
            Some(b) => a.as_slice() == b.as_slice(),
            None => true,
        })
    }
}

impl Eq for ByteValue {}

impl Ord for ByteValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.locked_pair(other, |a, b| match b {
            Some(b) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.as_slice().cmp(b.as_slice())),
            None => Ordering::Equal,
        })
    }
}

impl PartialOrd for ByteValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ByteValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (bytes, len) = self.snapshot();
        bytes[..len].hash(state);
    }
}

impl fmt::Display for ByteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bytes, len) = self.snapshot();
        write_bytes(f, &bytes[..len])
    }
}

impl fmt::Debug for ByteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteValue")
            .field(&format_args!("{}", self))
            .finish()
    }
}

/// A [`ByteValue`] that can be modified in place.
///
/// Mutation goes through `&self` and the same per-instance lock, so a
/// `MutableByteValue` can be shared between threads and written from any of
/// them. It dereferences to [`ByteValue`] for all read access.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutableByteValue(ByteValue);

impl MutableByteValue {
    /// Creates a mutable value holding a copy of `data`.
    pub fn create(data: &[u8]) -> Result<Self, ValueError> {
        ByteValue::create(data).map(Self)
    }

    /// Creates an empty mutable value.
    pub const fn empty() -> Self {
        Self(ByteValue::empty())
    }

    /// Replaces the contents with a copy of `data`.
    ///
    /// A heap allocation is reused when `data` still needs heap storage and
    /// fits in it. Data longer than 255 bytes is rejected and the value is
    /// left as it was. If a new heap buffer cannot be allocated the value is
    /// left empty.
    pub fn set(&self, data: &[u8]) -> Result<(), ValueError> {
        let result = self.0.locked(|buf| buf.set(data));
        #[cfg(feature = "logging")]
        if let Err(e) = &result {
            log::warn!("failed to store {}-byte value: {}", data.len(), e);
        }
        result
    }

    /// Moves the contents out into a new value, leaving this one empty.
    ///
    /// Heap storage is transferred, not copied.
    pub fn take(&self) -> ByteValue {
        let buf = self.0.locked(|buf| buf.take());
        ByteValue::from_buffer(buf)
    }

    /// Moves the contents of `donor` into this value, leaving `donor` empty.
    ///
    /// This value's previous storage is released. Assigning a value from
    /// itself does nothing.
    pub fn assign_from(&self, donor: &MutableByteValue) {
        self.0.locked_pair(&donor.0, |dst, src| {
            if let Some(src) = src {
                *dst = src.take();
            }
        });
    }

    /// Converts into an immutable value.
    pub fn into_inner(self) -> ByteValue {
        self.0
    }
}

impl Deref for MutableByteValue {
    type Target = ByteValue;

    fn deref(&self) -> &ByteValue {
        &self.0
    }
}

impl From<ByteValue> for MutableByteValue {
    fn from(value: ByteValue) -> Self {
        Self(value)
    }
}

impl fmt::Display for MutableByteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for MutableByteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableByteValue")
            .field(&format_args!("{}", self.0))
            .finish()
    }
}

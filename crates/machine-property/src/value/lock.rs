//! Per-instance spin lock.

use std::hint;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

/// A single-flag spin lock.
///
/// Critical sections are bounded copies of at most 255 bytes, so waiters
/// spin instead of parking. There is no timeout: a stalled holder stalls
/// every waiter. The lock is not reentrant.
#[derive(Debug, Default)]
pub(crate) struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    /// Creates an unlocked lock.
    pub(crate) const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    #[inline]
    fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Wait on a plain load to keep the cache line shared while contended
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    #[inline]
    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// Holds one or two spin locks until dropped.
///
/// Two distinct locks are always acquired in address order and released in
/// reverse, so two threads locking the same pair cannot deadlock. When both
/// locks are the same instance it is acquired once.
pub(crate) struct SpinGuard<'a> {
    first: &'a SpinLock,
    second: Option<&'a SpinLock>,
}

impl<'a> SpinGuard<'a> {
    /// Acquires a single lock.
    pub(crate) fn one(lock: &'a SpinLock) -> Self {
        lock.lock();
        Self {
            first: lock,
            second: None,
        }
    }

    /// Acquires two locks in address order.
    pub(crate) fn pair(a: &'a SpinLock, b: &'a SpinLock) -> Self {
        if ptr::eq(a, b) {
            return Self::one(a);
        }
        let (first, second) = if (a as *const SpinLock) < (b as *const SpinLock) {
            (a, b)
        } else {
            (b, a)
        };
        first.lock();
        second.lock();
        Self {
            first,
            second: Some(second),
        }
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        if let Some(second) = self.second {
            second.unlock();
        }
        self.first.unlock();
    }
}

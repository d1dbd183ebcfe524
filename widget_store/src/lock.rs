// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reader/writer lock with a write stamp for optimistic reads.
//!
//! Writers take the lock exclusively through [`StampedLock::write`]. The stamp
//! is odd while a writer holds the lock and advances to the next even value
//! when its [`WriteGuard`] drops, so any completed write changes it.
//!
//! Readers go through [`StampedLock::read`]:
//! 1. take a stamp (fails while a writer is active),
//! 2. run the lookup under a non-blocking `try_read`,
//! 3. validate the stamp; on any failure, run the lookup once more under a
//!    blocking shared lock.
//!
//! The closure may therefore run twice; only the result of the last run is
//! returned.

use core::fmt;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::trace;

/// Stamp bit set while a writer holds the lock.
const WRITE_BIT: u64 = 1;

/// Version observed at the start of an optimistic read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Stamp(u64);

pub(crate) struct StampedLock<T> {
    stamp: AtomicU64,
    inner: RwLock<T>,
}

impl<T> StampedLock<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self {
            stamp: AtomicU64::new(0),
            inner: RwLock::new(value),
        }
    }

    /// Stamp for an optimistic read, or `None` while a writer holds the lock.
    #[inline]
    pub(crate) fn try_optimistic_read(&self) -> Option<Stamp> {
        let value = self.stamp.load(Ordering::Acquire);
        ((value & WRITE_BIT) == 0).then_some(Stamp(value))
    }

    /// Whether no write has started or finished since `stamp` was taken.
    #[inline]
    pub(crate) fn validate(&self, stamp: Stamp) -> bool {
        self.stamp.load(Ordering::Acquire) == stamp.0
    }

    /// Run `f` against a consistent view of the protected value.
    pub(crate) fn read<R>(&self, mut f: impl FnMut(&T) -> R) -> R {
        if let Some(stamp) = self.try_optimistic_read()
            && let Some(guard) = self.inner.try_read()
        {
            let out = f(&*guard);
            drop(guard);
            if self.validate(stamp) {
                return out;
            }
        }
        trace!("optimistic read invalidated, retrying under shared lock");
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Acquire exclusive access. Blocks until every reader and writer is gone.
    pub(crate) fn write(&self) -> WriteGuard<'_, T> {
        let guard = self.inner.write();
        let previous = self.stamp.fetch_add(1, Ordering::AcqRel);
        debug_assert!(
            (previous & WRITE_BIT) == 0,
            "write stamp was odd while acquiring the write lock"
        );
        WriteGuard {
            stamp: &self.stamp,
            guard,
        }
    }
}

impl<T> fmt::Debug for StampedLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StampedLock")
            .field("stamp", &self.stamp.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Exclusive access to the protected value.
///
/// Dropping the guard publishes a new stamp and then releases the lock.
pub(crate) struct WriteGuard<'a, T> {
    stamp: &'a AtomicU64,
    guard: RwLockWriteGuard<'a, T>,
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        // Runs before `guard` is dropped, so the lock is still held here.
        self.stamp.fetch_add(1, Ordering::Release);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimistic read / exclusive write guard around a single value.
//!
//! The value lives twice: a working copy behind a reader/writer lock, and an
//! immutable published snapshot behind an [`ArcSwap`].
//!
//! Writers take the lock exclusively through a [`WriteSection`] and mutate the
//! working copy. The section makes the version stamp odd when it opens. When
//! it closes it publishes a fresh snapshot and makes the stamp even again.
//!
//! Readers first try the optimistic path: capture an even stamp, load the
//! published snapshot, and check that the stamp is unchanged. No lock is held,
//! so a slow reader never delays a writer. If a write section was open or
//! opened in between, the read falls back to the shared lock, which waits for
//! that writer and holds off new ones until the read finishes.

use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{RwLock, RwLockWriteGuard};

/// Counters describing how reads and writes were served.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockStats {
    /// Reads served from a validated snapshot without taking the lock.
    pub optimistic_reads: u64,
    /// Reads that fell back to (or were configured for) the shared lock.
    pub locked_reads: u64,
    /// Completed write sections.
    pub writes: u64,
}

#[derive(Debug, Default)]
struct Counters {
    optimistic_reads: AtomicU64,
    locked_reads: AtomicU64,
    writes: AtomicU64,
}

/// A value behind a version-stamped reader/writer lock with lock-free
/// snapshot reads.
///
/// Every write section clones the value once to publish it.
#[derive(Debug)]
pub struct OptimisticLock<T> {
    stamp: AtomicU64,
    optimistic: bool,
    counters: Counters,
    published: ArcSwap<T>,
    inner: RwLock<T>,
}

impl<T: Clone + Default> Default for OptimisticLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> OptimisticLock<T> {
    /// Wrap `value` with optimistic reads enabled.
    pub fn new(value: T) -> Self {
        Self::with_optimistic_reads(value, true)
    }

    /// Wrap `value`; when `optimistic` is false every read takes the shared
    /// lock.
    pub fn with_optimistic_reads(value: T, optimistic: bool) -> Self {
        Self {
            stamp: AtomicU64::new(0),
            optimistic,
            counters: Counters::default(),
            published: ArcSwap::from_pointee(value.clone()),
            inner: RwLock::new(value),
        }
    }

    /// Current version stamp. Odd while a write section is open.
    pub fn stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    /// Run `f` against a consistent view of the value.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        if self.optimistic {
            match self.snapshot() {
                Some(snapshot) => {
                    self.counters.optimistic_reads.fetch_add(1, Ordering::Relaxed);
                    return f(&snapshot);
                }
                None => {
                    tracing::trace!(
                        stamp = self.stamp(),
                        "optimistic read fell back to shared lock"
                    );
                }
            }
        }
        let guard = self.inner.read();
        self.counters.locked_reads.fetch_add(1, Ordering::Relaxed);
        f(&guard)
    }

    /// The published snapshot, if no write section was open while loading it.
    fn snapshot(&self) -> Option<Arc<T>> {
        let before = self.stamp.load(Ordering::Acquire);
        if before % 2 == 1 {
            return None;
        }
        let snapshot = self.published.load_full();
        (self.stamp.load(Ordering::Acquire) == before).then_some(snapshot)
    }

    /// Open an exclusive write section, blocking until lock-holding readers
    /// and other writers have left. Optimistic readers are not waited for.
    pub fn write(&self) -> WriteSection<'_, T> {
        let guard = self.inner.write();
        self.stamp.fetch_add(1, Ordering::AcqRel);
        WriteSection { lock: self, guard }
    }

    /// Snapshot of the read and write counters.
    pub fn stats(&self) -> LockStats {
        LockStats {
            optimistic_reads: self.counters.optimistic_reads.load(Ordering::Relaxed),
            locked_reads: self.counters.locked_reads.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
        }
    }

    /// Consume the lock, returning the value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

/// Exclusive access to the value of an [`OptimisticLock`].
///
/// Dropping the section publishes the value and closes the section. If the
/// section is dropped during a panic, the value is rolled back to the last
/// published snapshot instead.
#[derive(Debug)]
pub struct WriteSection<'a, T: Clone> {
    lock: &'a OptimisticLock<T>,
    guard: RwLockWriteGuard<'a, T>,
}

impl<T: Clone> Deref for WriteSection<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T: Clone> DerefMut for WriteSection<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T: Clone> Drop for WriteSection<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            *self.guard = T::clone(&self.lock.published.load());
        } else {
            self.lock.published.store(Arc::new(T::clone(&self.guard)));
        }
        // Runs before `guard` is released.
        self.lock.stamp.fetch_add(1, Ordering::AcqRel);
        self.lock.counters.writes.fetch_add(1, Ordering::Relaxed);
    }
}

//! The four concurrency-control strategies.
//!
//! A [`GuardedStore`] pairs one [`CounterStore`] with the lock state its
//! [`Strategy`] requires. The strategy set is a closed enum selected at
//! construction, not a trait-object hierarchy: the four disciplines are
//! the whole experiment, and a `match` keeps dispatch static and
//! exhaustive.
//!
//! | Strategy | read/read | read/write | write/write |
//! |----------|-----------|------------|-------------|
//! | [`Unsynchronized`](Strategy::Unsynchronized) | races | races | races |
//! | [`SingleLock`](Strategy::SingleLock) | serialized | serialized | serialized |
//! | [`ReaderWriter`](Strategy::ReaderWriter) | parallel | serialized | serialized |
//! | [`Partitioned`](Strategy::Partitioned) | per partition | per partition | parallel across partitions |
//!
//! Every operation acquires at most one lock, scoped to that call. Guards
//! drop on every exit path, including the out-of-bounds error path, so no
//! lock outlives its operation.

use std::fmt;

use parking_lot::{Mutex, RwLock};

use crate::error::StoreError;
use crate::probe::SectionProbe;
use crate::store::{CounterStore, Delays};

/// Which locking discipline guards the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// No synchronization at all. Concurrent updates race and lose
    /// increments; the negative control.
    Unsynchronized,
    /// One exclusive lock over the whole store. Totally orders every
    /// operation, including read pairs that never conflict.
    SingleLock,
    /// One reader-writer lock: shared reads, exclusive writes.
    ReaderWriter,
    /// K exclusive locks with lock `index % K`. Writes to different
    /// partitions proceed in parallel; a partition admits one operation
    /// at a time regardless of kind.
    Partitioned,
}

impl Strategy {
    /// All strategies, in demonstration order.
    pub const ALL: [Self; 4] = [
        Self::Unsynchronized,
        Self::SingleLock,
        Self::ReaderWriter,
        Self::Partitioned,
    ];

    /// Name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsynchronized => "unsynchronized store",
            Self::SingleLock => "single-mutex store",
            Self::ReaderWriter => "reader-writer store",
            Self::Partitioned => "partitioned store",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lock state owned by a [`GuardedStore`], one variant per [`Strategy`].
#[derive(Debug)]
enum LockState {
    None,
    Single(Mutex<()>),
    ReaderWriter(RwLock<()>),
    Partitioned(Box<[Mutex<()>]>),
}

/// A [`CounterStore`] behind the lock discipline of one [`Strategy`].
///
/// Exactly one store per instance; the lock objects are owned here and
/// never shared across stores.
#[derive(Debug)]
pub struct GuardedStore {
    raw: CounterStore,
    locks: LockState,
    strategy: Strategy,
}

impl GuardedStore {
    /// Store of `len` zeroed counters with default delays and, for
    /// [`Strategy::Partitioned`], `max(len / 2, 1)` partitions.
    #[must_use]
    pub fn new(strategy: Strategy, len: usize) -> Self {
        Self::with_delays(strategy, len, Delays::default())
    }

    /// As [`GuardedStore::new`] with explicit pre-access delays.
    #[must_use]
    pub fn with_delays(strategy: Strategy, len: usize, delays: Delays) -> Self {
        Self::build(strategy, len, delays, default_partitions(len))
    }

    /// Partitioned store with an explicit partition count.
    ///
    /// # Panics
    ///
    /// Panics when `partitions` is zero.
    #[must_use]
    pub fn partitioned(len: usize, delays: Delays, partitions: usize) -> Self {
        assert!(partitions > 0, "partition count must be non-zero");
        Self::build(Strategy::Partitioned, len, delays, partitions)
    }

    fn build(strategy: Strategy, len: usize, delays: Delays, partitions: usize) -> Self {
        let locks = match strategy {
            Strategy::Unsynchronized => LockState::None,
            Strategy::SingleLock => LockState::Single(Mutex::new(())),
            Strategy::ReaderWriter => LockState::ReaderWriter(RwLock::new(())),
            Strategy::Partitioned => {
                LockState::Partitioned((0..partitions).map(|_| Mutex::new(())).collect())
            }
        };

        Self {
            raw: CounterStore::with_delays(len, delays),
            locks,
            strategy,
        }
    }

    /// The strategy selected at construction.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of counters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the store holds no counters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Occupancy probe of the underlying store.
    #[must_use]
    pub const fn probe(&self) -> &SectionProbe {
        self.raw.probe()
    }

    /// Read the counter at `index` under the strategy's read discipline.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] when `index >= len`. The lock, if any,
    /// is released before the error reaches the caller.
    pub fn read(&self, index: usize) -> Result<i64, StoreError> {
        match &self.locks {
            LockState::None => self.raw.read(index),
            LockState::Single(lock) => {
                let _held = lock.lock();
                self.raw.read(index)
            }
            LockState::ReaderWriter(lock) => {
                let _held = lock.read();
                self.raw.read(index)
            }
            LockState::Partitioned(locks) => {
                let _held = locks[index % locks.len()].lock();
                self.raw.read(index)
            }
        }
    }

    /// Add `delta` to the counter at `index` under the strategy's write
    /// discipline.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] when `index >= len`.
    pub fn update(&self, index: usize, delta: i64) -> Result<(), StoreError> {
        match &self.locks {
            LockState::None => self.raw.update(index, delta),
            LockState::Single(lock) => {
                let _held = lock.lock();
                self.raw.update(index, delta)
            }
            LockState::ReaderWriter(lock) => {
                let _held = lock.write();
                self.raw.update(index, delta)
            }
            LockState::Partitioned(locks) => {
                let _held = locks[index % locks.len()].lock();
                self.raw.update(index, delta)
            }
        }
    }

    /// True iff every counter is exactly zero. Post-run validation only.
    #[must_use]
    pub fn all_zero(&self) -> bool {
        self.raw.all_zero()
    }

    /// Copy of the counters for reporting.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        self.raw.snapshot()
    }
}

/// Partition count when the caller does not pick one: half the store,
/// so partitions are contended but not degenerate.
fn default_partitions(len: usize) -> usize {
    (len / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strategy_round_trips_single_threaded() {
        for strategy in Strategy::ALL {
            let store = GuardedStore::with_delays(strategy, 4, Delays::ZERO);

            store.update(1, 25).unwrap();
            store.update(1, -40).unwrap();
            store.update(1, 15).unwrap();

            assert_eq!(store.read(1).unwrap(), 0, "{strategy}");
            assert!(store.all_zero(), "{strategy}");
        }
    }

    #[test]
    fn every_strategy_rejects_out_of_bounds() {
        for strategy in Strategy::ALL {
            let store = GuardedStore::with_delays(strategy, 3, Delays::ZERO);

            assert_eq!(
                store.read(3),
                Err(StoreError::OutOfBounds { index: 3, len: 3 }),
                "{strategy}"
            );
            assert_eq!(
                store.update(7, 1),
                Err(StoreError::OutOfBounds { index: 7, len: 3 }),
                "{strategy}"
            );
        }
    }

    #[test]
    fn partitioned_maps_indices_beyond_partition_count() {
        // 2 partitions over 6 counters: indices 0..6 map onto locks 0 and 1.
        let store = GuardedStore::partitioned(6, Delays::ZERO, 2);

        for index in 0..6 {
            store.update(index, 1).unwrap();
            assert_eq!(store.read(index).unwrap(), 1);
        }
    }

    #[test]
    #[should_panic(expected = "partition count must be non-zero")]
    fn zero_partitions_is_rejected() {
        let _ = GuardedStore::partitioned(4, Delays::ZERO, 0);
    }

    #[test]
    fn display_names_are_stable() {
        let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "unsynchronized store",
                "single-mutex store",
                "reader-writer store",
                "partitioned store"
            ]
        );
    }
}

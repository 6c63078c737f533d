//! Baseline counter store with no internal locking.
//!
//! [`CounterStore`] is a fixed-length run of signed 64-bit counters, all
//! zero at construction and never resized. It is the negative control of
//! the benchmark: `read` and `update` perform no synchronization, so
//! concurrent updates to the same counter can lose increments. The
//! locking variants in [`crate::strategy`] restore whatever exclusion
//! they promise from the outside, delegating the memory access here.
//!
//! # Concurrency Model
//!
//! Counters live in [`AtomicI64`] cells accessed with relaxed ordering.
//! [`CounterStore::update`] is a split load/store pair, not `fetch_add`:
//! two unsynchronized updates may both load the same value and one
//! increment vanishes. That lost-update defect is the point of the
//! baseline and must stay observable.
//!
//! Both operations pause before touching memory to stand in for heavier
//! work and widen the interleaving window. The pauses are configurable
//! through [`Delays`] so tests and benches can tune contention.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use crate::error::StoreError;
use crate::probe::SectionProbe;

/// Ordering for counter loads and stores.
///
/// Relaxed on purpose: the baseline promises no synchronization, and the
/// locked variants get their ordering from lock acquire/release.
const CELL_ORD: Ordering = Ordering::Relaxed;

/// Pre-access pauses, the race-widening device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Pause before the load in [`CounterStore::read`].
    pub read: Duration,
    /// Pause before the load/store pair in [`CounterStore::update`].
    pub update: Duration,
}

impl Delays {
    /// Delays used by the demonstration binary: reads are cheap, updates
    /// markedly heavier.
    pub const DEMO: Self = Self {
        read: Duration::from_millis(1),
        update: Duration::from_millis(5),
    };

    /// No artificial pause at all.
    pub const ZERO: Self = Self {
        read: Duration::ZERO,
        update: Duration::ZERO,
    };
}

impl Default for Delays {
    fn default() -> Self {
        Self::DEMO
    }
}

/// A fixed-length sequence of signed 64-bit counters with no internal
/// locking.
///
/// Not safe for concurrent writers, nor for a writer concurrent with a
/// reader; wrap it in a [`crate::strategy::GuardedStore`] with a
/// synchronized strategy for that.
#[derive(Debug)]
pub struct CounterStore {
    cells: Box<[AtomicI64]>,
    delays: Delays,
    probe: SectionProbe,
}

impl CounterStore {
    /// Store of `len` zeroed counters with [`Delays::DEMO`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::with_delays(len, Delays::default())
    }

    /// Store of `len` zeroed counters with explicit delays.
    #[must_use]
    pub fn with_delays(len: usize, delays: Delays) -> Self {
        let cells = (0..len).map(|_| AtomicI64::new(0)).collect();

        Self {
            cells,
            delays,
            probe: SectionProbe::new(),
        }
    }

    /// Number of counters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the store holds no counters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupancy probe bracketing every read and update.
    #[must_use]
    pub const fn probe(&self) -> &SectionProbe {
        &self.probe
    }

    #[inline]
    fn cell(&self, index: usize) -> Result<&AtomicI64, StoreError> {
        self.cells.get(index).ok_or(StoreError::OutOfBounds {
            index,
            len: self.cells.len(),
        })
    }

    /// Current value of the counter at `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] when `index >= len`.
    pub fn read(&self, index: usize) -> Result<i64, StoreError> {
        let cell = self.cell(index)?;

        let _section = self.probe.enter_read();
        pause(self.delays.read);

        Ok(cell.load(CELL_ORD))
    }

    /// Add `delta` to the counter at `index`, wrapping on overflow.
    ///
    /// The load/store pair is deliberately not `fetch_add`: with no lock
    /// above it, two concurrent updates can interleave between the load
    /// and the store and one delta is lost.
    ///
    /// # Errors
    ///
    /// [`StoreError::OutOfBounds`] when `index >= len`.
    pub fn update(&self, index: usize, delta: i64) -> Result<(), StoreError> {
        let cell = self.cell(index)?;

        let _section = self.probe.enter_write();
        pause(self.delays.update);

        let current = cell.load(CELL_ORD);
        cell.store(current.wrapping_add(delta), CELL_ORD);

        Ok(())
    }

    /// True iff every counter is exactly zero.
    ///
    /// Post-run validation only; the answer is meaningless while tasks
    /// are still mutating the store.
    #[must_use]
    pub fn all_zero(&self) -> bool {
        self.cells.iter().all(|cell| cell.load(CELL_ORD) == 0)
    }

    /// Copy of the counters for reporting.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        self.cells.iter().map(|cell| cell.load(CELL_ORD)).collect()
    }
}

/// Sleep for `duration`, skipping the syscall entirely when it is zero.
#[inline]
pub(crate) fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

//! Critical-section occupancy instrumentation.
//!
//! [`SectionProbe`] counts how many readers and writers are inside the
//! store's memory section at the same time. Every store operation
//! brackets its access with an entry guard, so the probe sees exactly the
//! concurrency the locking strategy admits: a correctly exclusive lock
//! can never produce `max_total > 1`, and a reader-writer lock can never
//! produce an exclusion violation.
//!
//! The counters are diagnostics, not synchronization: relaxed atomics,
//! read out after the workload has joined. High-water marks are exact for
//! the exclusion they measure, because a held lock orders the gauge
//! updates of the operations it serializes.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordering for all probe counters. The probe never synchronizes data.
const PROBE_ORD: Ordering = Ordering::Relaxed;

/// Live gauges and high-water marks for one store's critical section.
#[derive(Debug, Default)]
pub struct SectionProbe {
    readers: AtomicUsize,
    writers: AtomicUsize,
    max_readers: AtomicUsize,
    max_writers: AtomicUsize,
    max_total: AtomicUsize,
    violations: AtomicUsize,
}

/// Counter values read out of a [`SectionProbe`] after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSnapshot {
    /// Most readers ever inside the section at once.
    pub max_readers: usize,
    /// Most writers ever inside the section at once.
    pub max_writers: usize,
    /// Most operations of any kind inside the section at once.
    pub max_total: usize,
    /// Times a writer shared the section with any other operation, or a
    /// reader entered while a writer was inside.
    pub exclusion_violations: usize,
}

impl SectionProbe {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a reader entering the section. The returned guard records
    /// the exit when dropped.
    #[inline]
    pub(crate) fn enter_read(&self) -> SectionGuard<'_> {
        let live = self.readers.fetch_add(1, PROBE_ORD) + 1;
        self.max_readers.fetch_max(live, PROBE_ORD);

        let writers = self.writers.load(PROBE_ORD);
        if writers > 0 {
            self.violations.fetch_add(1, PROBE_ORD);
        }
        self.max_total.fetch_max(live + writers, PROBE_ORD);

        SectionGuard { gauge: &self.readers }
    }

    /// Record a writer entering the section.
    #[inline]
    pub(crate) fn enter_write(&self) -> SectionGuard<'_> {
        let live = self.writers.fetch_add(1, PROBE_ORD) + 1;
        self.max_writers.fetch_max(live, PROBE_ORD);

        let readers = self.readers.load(PROBE_ORD);
        if live > 1 || readers > 0 {
            self.violations.fetch_add(1, PROBE_ORD);
        }
        self.max_total.fetch_max(live + readers, PROBE_ORD);

        SectionGuard { gauge: &self.writers }
    }

    /// Read the high-water marks accumulated so far.
    #[must_use]
    pub fn snapshot(&self) -> SectionSnapshot {
        SectionSnapshot {
            max_readers: self.max_readers.load(PROBE_ORD),
            max_writers: self.max_writers.load(PROBE_ORD),
            max_total: self.max_total.load(PROBE_ORD),
            exclusion_violations: self.violations.load(PROBE_ORD),
        }
    }

    /// Zero every counter. Only meaningful while no operation is in
    /// flight.
    pub fn reset(&self) {
        self.readers.store(0, PROBE_ORD);
        self.writers.store(0, PROBE_ORD);
        self.max_readers.store(0, PROBE_ORD);
        self.max_writers.store(0, PROBE_ORD);
        self.max_total.store(0, PROBE_ORD);
        self.violations.store(0, PROBE_ORD);
    }
}

/// Decrements its gauge when dropped, so an exit is recorded on every
/// path out of the section, including unwinding.
#[derive(Debug)]
#[must_use = "dropping the guard immediately records the section as empty"]
pub(crate) struct SectionGuard<'a> {
    gauge: &'a AtomicUsize,
}

impl Drop for SectionGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.gauge.fetch_sub(1, PROBE_ORD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_entries_never_overlap() {
        let probe = SectionProbe::new();

        for _ in 0..3 {
            let guard = probe.enter_read();
            drop(guard);
        }
        let guard = probe.enter_write();
        drop(guard);

        let snap = probe.snapshot();
        assert_eq!(snap.max_readers, 1);
        assert_eq!(snap.max_writers, 1);
        assert_eq!(snap.max_total, 1);
        assert_eq!(snap.exclusion_violations, 0);
    }

    #[test]
    fn overlapping_readers_raise_the_high_water_mark() {
        let probe = SectionProbe::new();

        let first = probe.enter_read();
        let second = probe.enter_read();
        drop(second);
        drop(first);

        let snap = probe.snapshot();
        assert_eq!(snap.max_readers, 2);
        assert_eq!(snap.max_total, 2);
        assert_eq!(snap.exclusion_violations, 0);
    }

    #[test]
    fn writer_sharing_the_section_is_a_violation() {
        let probe = SectionProbe::new();

        let reader = probe.enter_read();
        let writer = probe.enter_write();
        drop(writer);
        drop(reader);

        let snap = probe.snapshot();
        assert_eq!(snap.max_total, 2);
        assert_eq!(snap.exclusion_violations, 1);
    }

    #[test]
    fn reset_clears_accumulated_marks() {
        let probe = SectionProbe::new();
        drop(probe.enter_write());
        probe.reset();

        let snap = probe.snapshot();
        assert_eq!(snap.max_writers, 0);
        assert_eq!(snap.max_total, 0);
    }
}

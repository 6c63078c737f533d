//! Reader and writer passes over a guarded store.
//!
//! A pass is one full sweep of the store in a shuffled order: readers
//! read every counter once, writers apply one delta to every counter.
//! Passes pause between operations so many tasks stay in flight at once;
//! the pacing is configurable down to zero for tests and benches.

use std::time::Duration;

use crate::error::StoreError;
use crate::shuffle::shuffled_indices;
use crate::store::pause;
use crate::strategy::GuardedStore;

/// Seed-mix multipliers, one per mixed-in component.
const TASK_MULT: u64 = 0x9e37_79b9_7f4a_7c15;
const PASS_MULT: u64 = 0xbf58_476d_1ce4_e5b9;

/// Deterministic seed for one task's pass.
///
/// Distinct `(task, pass)` pairs get distinct shuffle seeds, so every
/// pass of every task walks its own order while the whole run stays
/// reproducible from `base`.
#[must_use]
pub fn task_seed(base: u64, task: u64, pass: u64) -> u64 {
    base ^ task.wrapping_add(1).wrapping_mul(TASK_MULT)
        ^ pass.wrapping_add(1).wrapping_mul(PASS_MULT)
}

/// One full read scan in shuffled order, pausing `pacing` after each
/// read.
///
/// # Errors
///
/// Propagates the first [`StoreError`] from the store; the scan only
/// visits in-bounds indices, so none is expected.
pub fn read_pass(store: &GuardedStore, seed: u64, pacing: Duration) -> Result<(), StoreError> {
    for index in shuffled_indices(store.len(), seed) {
        store.read(index)?;
        pause(pacing);
    }

    Ok(())
}

/// One full update sweep applying `delta` to every counter in shuffled
/// order, pausing `pacing` after each update.
///
/// # Errors
///
/// Propagates the first [`StoreError`] from the store.
pub fn update_pass(
    store: &GuardedStore,
    delta: i64,
    seed: u64,
    pacing: Duration,
) -> Result<(), StoreError> {
    for index in shuffled_indices(store.len(), seed) {
        store.update(index, delta)?;
        pause(pacing);
    }

    Ok(())
}

//! Benchmark harness: spawn, join, validate, report.
//!
//! One run walks a fixed sequence of phases: launch every writer and
//! reader task against a single shared store, join them all (a hard
//! barrier; nothing is inspected before the last task finishes), validate
//! the all-zero oracle, and hand back a [`RunReport`]. The harness runs
//! each strategy exactly once per call and reports whatever it observed,
//! including failure. There are no retries and no timeouts; a deadlocked
//! strategy shows up as a run that never joins.
//!
//! The oracle works because every writer's delta sequence nets to zero
//! per counter: under correct synchronization the final state must be all
//! zeros, so any drift is lost updates.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::StoreError;
use crate::probe::SectionSnapshot;
use crate::store::Delays;
use crate::strategy::{GuardedStore, Strategy};
use crate::trace::{debug_log, warn_log};
use crate::workload::{read_pass, task_seed, update_pass};

/// Workload parameters for one benchmark run.
///
/// The defaults reproduce the demonstration workload: 10 counters, 100
/// writers each sweeping `+25, -40, +15`, 1000 readers each scanning
/// once, with the full artificial delays and pacing.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of counters in the store.
    pub store_len: usize,
    /// Writer task count.
    pub writers: usize,
    /// Reader task count.
    pub readers: usize,
    /// Deltas applied by each writer, one full pass per delta. The
    /// sequence must net to zero per index for the all-zero oracle to
    /// hold.
    pub deltas: [i64; 3],
    /// Times each writer repeats its full delta sweep.
    pub repetitions: usize,
    /// Pause after each read operation.
    pub read_pacing: Duration,
    /// Pause after each update operation.
    pub update_pacing: Duration,
    /// Pre-access store delays.
    pub delays: Delays,
    /// Partition count for [`Strategy::Partitioned`]; `None` picks
    /// `max(store_len / 2, 1)`.
    pub partitions: Option<usize>,
    /// Base seed every task/pass shuffle seed derives from.
    pub base_seed: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            store_len: 10,
            writers: 100,
            readers: 1000,
            deltas: [25, -40, 15],
            repetitions: 1,
            read_pacing: Duration::from_millis(1),
            update_pacing: Duration::from_millis(10),
            delays: Delays::DEMO,
            partitions: None,
            base_seed: 42,
        }
    }
}

impl HarnessConfig {
    /// Config with every artificial delay and pause removed, for tests
    /// and benches that want contention without wall-clock cost.
    #[must_use]
    pub fn quick(store_len: usize, writers: usize, readers: usize) -> Self {
        Self {
            store_len,
            writers,
            readers,
            read_pacing: Duration::ZERO,
            update_pacing: Duration::ZERO,
            delays: Delays::ZERO,
            ..Self::default()
        }
    }

    fn build_store(&self, strategy: Strategy) -> GuardedStore {
        match (strategy, self.partitions) {
            (Strategy::Partitioned, Some(partitions)) => {
                GuardedStore::partitioned(self.store_len, self.delays, partitions)
            }
            _ => GuardedStore::with_delays(strategy, self.store_len, self.delays),
        }
    }
}

/// Outcome of the all-zero validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every counter was zero after the join barrier.
    Pass,
    /// At least one counter drifted; the strategy lost updates.
    Failed,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => f.write_str("Pass"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// Everything observed from one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Strategy under test.
    pub strategy: Strategy,
    /// Wall time from first spawn to last join.
    pub elapsed: Duration,
    /// Final counter values.
    pub counters: Vec<i64>,
    /// All-zero validation outcome.
    pub verdict: Verdict,
    /// Section occupancy high-water marks from the store's probe.
    pub sections: SectionSnapshot,
}

/// Run `strategy` once under `config` and report what happened.
///
/// A [`Verdict::Failed`] is a reported outcome, not an error; the
/// unsynchronized baseline is expected to produce it under load.
///
/// # Errors
///
/// Propagates the first [`StoreError`] returned by any task, after every
/// task has joined. The prescribed workload only visits in-bounds
/// indices, so an error here means the config and store disagree.
///
/// # Panics
///
/// Panics if a worker thread panicked.
pub fn run(strategy: Strategy, config: &HarnessConfig) -> Result<RunReport, StoreError> {
    let store = Arc::new(config.build_store(strategy));

    debug_log!(
        strategy = strategy.name(),
        writers = config.writers,
        readers = config.readers,
        store_len = config.store_len,
        "launching workload"
    );

    let started = Instant::now();
    let mut handles = Vec::with_capacity(config.writers + config.readers);

    let passes = config.deltas.len();
    for task in 0..config.writers {
        let store = Arc::clone(&store);
        let deltas = config.deltas;
        let repetitions = config.repetitions;
        let pacing = config.update_pacing;
        let base = config.base_seed;

        handles.push(thread::spawn(move || -> Result<(), StoreError> {
            for repetition in 0..repetitions {
                for (pass, delta) in deltas.into_iter().enumerate() {
                    let seed = task_seed(base, task as u64, (repetition * passes + pass) as u64);
                    update_pass(&store, delta, seed, pacing)?;
                }
            }

            Ok(())
        }));
    }

    for task in 0..config.readers {
        let store = Arc::clone(&store);
        let pacing = config.read_pacing;
        let seed = task_seed(config.base_seed, (config.writers + task) as u64, 0);

        handles.push(thread::spawn(move || -> Result<(), StoreError> {
            read_pass(&store, seed, pacing)
        }));
    }

    // Join barrier: keep joining even after a task error so no handle
    // leaks past the run.
    let mut outcome = Ok(());
    for handle in handles {
        let result = handle.join().expect("worker thread panicked");
        if outcome.is_ok() {
            outcome = result;
        }
    }
    let elapsed = started.elapsed();
    outcome?;

    let verdict = if store.all_zero() {
        Verdict::Pass
    } else {
        Verdict::Failed
    };

    if verdict == Verdict::Failed {
        warn_log!(
            strategy = strategy.name(),
            "counters drifted from zero after join"
        );
    }

    debug_log!(
        strategy = strategy.name(),
        elapsed_ms = elapsed.as_millis() as u64,
        "run complete"
    );

    Ok(RunReport {
        strategy,
        elapsed,
        counters: store.snapshot(),
        verdict,
        sections: store.probe().snapshot(),
    })
}

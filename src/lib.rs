//! # lockgrain
//!
//! Four strategies for concurrent access to a shared fixed-size counter
//! store, quantifying what each locking granularity costs and what it
//! buys.
//!
//! | Strategy | Guarantee | Cost |
//! |----------|-----------|------|
//! | Unsynchronized | none (lost updates under load) | none; the negative control |
//! | Single lock | total order over all operations | readers serialize against each other |
//! | Reader-writer | shared reads, exclusive writes | no write/write parallelism |
//! | Partitioned | exclusion per partition | no read/read parallelism within a partition |
//!
//! The store is a fixed run of signed 64-bit counters. The harness drives
//! it with writers whose per-counter deltas net to zero, so "all counters
//! zero after the join" is the correctness oracle: any drift is a lost
//! update. Reads and updates pause before touching memory to widen the
//! interleaving window; the pauses are configurable so tests can tune
//! contention.
//!
//! ## Example
//!
//! ```rust
//! use lockgrain::{GuardedStore, Strategy};
//!
//! let store = GuardedStore::new(Strategy::ReaderWriter, 4);
//! store.update(0, 7)?;
//! assert_eq!(store.read(0)?, 7);
//! # Ok::<(), lockgrain::StoreError>(())
//! ```
//!
//! ## Running the demonstration
//!
//! ```bash
//! cargo run --release
//!
//! # With phase logging:
//! RUST_LOG=lockgrain=debug cargo run --release --features tracing
//! ```
//!
//! Every run prints, per strategy, the elapsed wall time, the final
//! counters, and a `Pass`/`FAILED` verdict. The unsynchronized baseline
//! is expected to fail under load; the three locked strategies must
//! always pass.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod harness;
pub mod probe;
pub mod shuffle;
pub mod store;
pub mod strategy;
pub mod workload;

mod trace;

// Re-export the main types for convenience.
pub use error::StoreError;
pub use harness::{run, HarnessConfig, RunReport, Verdict};
pub use probe::{SectionProbe, SectionSnapshot};
pub use shuffle::shuffled_indices;
pub use store::{CounterStore, Delays};
pub use strategy::{GuardedStore, Strategy};

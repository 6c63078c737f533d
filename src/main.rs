//! Lock-granularity demonstration binary.
//!
//! Runs the four store strategies in sequence against the full
//! demonstration workload (10 counters, 100 writers, 1000 readers) and
//! prints timing, final contents, and the all-zero verdict for each.
//! The unsynchronized baseline is expected to report `FAILED`; the exit
//! code stays 0 either way.
//!
//! Run with:
//! ```bash
//! cargo run --release
//!
//! # With phase logging:
//! RUST_LOG=lockgrain=debug cargo run --release --features tracing
//!
//! # With mimalloc:
//! cargo run --release --features mimalloc
//! ```

use lockgrain::{run, HarnessConfig, RunReport, StoreError, Strategy};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockgrain=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}

fn print_report(report: &RunReport) {
    let contents = report
        .counters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    println!("Results for {}:", report.strategy);
    println!("  Elapsed Time:    {}ms", report.elapsed.as_millis());
    println!("  Store Contents:  {contents}");
    println!("  All Zero:        {}", report.verdict);
}

fn main() -> Result<(), StoreError> {
    init_tracing();

    let config = HarnessConfig::default();
    for strategy in Strategy::ALL {
        let report = run(strategy, &config)?;
        print_report(&report);
    }

    Ok(())
}

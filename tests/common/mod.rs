//! Shared test bootstrap: tracing to console and an NDJSON file.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... tracing::info!, tracing::debug!, etc.
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: filter directives (default `info`)
//! - `LOCKGRAIN_LOG_DIR`: log directory (default `logs/`)
//! - `LOCKGRAIN_LOG_CONSOLE`: set to `0` to silence the console layer
//!
//! Logs land in `logs/lockgrain.jsonl` as newline-delimited JSON; pipe
//! through `jq` to filter.

#![allow(dead_code)]

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(setup);
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn setup() {
    let log_dir = env::var("LOCKGRAIN_LOG_DIR").map_or_else(|_| PathBuf::from("logs"), PathBuf::from);
    std::fs::create_dir_all(&log_dir).expect("failed to create log directory");

    // Append mode: test binaries run in separate processes.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("lockgrain.jsonl"))
        .expect("failed to open log file");

    let console_enabled = env::var("LOCKGRAIN_LOG_CONSOLE").map_or(true, |v| v != "0");
    let console_layer = console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_target(false)
            .compact()
            .with_filter(filter())
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_thread_ids(true)
        .json()
        .with_filter(filter());

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

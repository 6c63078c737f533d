//! Error types for store access.

use thiserror::Error;

/// Failure of a store operation.
///
/// The only failure mode is an out-of-range index: the prescribed
/// workloads always draw indices from `[0, len)`, so this is a defensive
/// contract rather than an expected path. Lock acquisition cannot fail
/// ([`parking_lot`] locks do not poison) and never times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Index past the end of the store.
    #[error("index {index} out of bounds for store of length {len}")]
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// Store length fixed at construction.
        len: usize,
    },
}

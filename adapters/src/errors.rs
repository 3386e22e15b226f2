//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to the backing
//! document store, providing a unified error handling mechanism for all
//! adapter implementations.

use thiserror::Error;

/// Faults surfaced by a store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered, but the addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Any other backend fault: I/O, a malformed document, a rejected write.
    #[error("backend error: {0}")]
    Backend(String),
}

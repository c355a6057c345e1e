//! # Error Types
//!
//! Persistence error types for storefront-cart.
//!
//! Cart operations themselves are infallible by contract (inputs are
//! coerced, never rejected), so the only fallible surface in this crate is
//! the snapshot store. Persistence failures are non-fatal: the in-memory
//! cart stays authoritative for the session and the failure is logged.

use thiserror::Error;

// =============================================================================
// Snapshot Error
// =============================================================================

/// Errors from loading or saving the persisted cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Storage read/write failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document could not be (de)serialized.
    ///
    /// On load this means a corrupt snapshot; the store treats it as
    /// "no prior cart" rather than failing to start.
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for snapshot results.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

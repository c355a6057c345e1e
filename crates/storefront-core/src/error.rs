//! # Error Types
//!
//! Validation error types for storefront-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Surfaces                                  │
//! │                                                                         │
//! │  Catalog ingestion (validation.rs)                                     │
//! │  └── ValidationError - malformed item codes, ambiguous tier sets       │
//! │                                                                         │
//! │  Cart operations (storefront-cart)                                     │
//! │  └── NONE by contract - inputs are coerced, never rejected             │
//! │      (quantity <= 0 means "remove", unknown codes are no-ops)          │
//! │                                                                         │
//! │  Snapshot persistence (storefront-cart)                                │
//! │  └── SnapshotError - lives next to the storage code, not here          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised at the catalog ingestion boundary.
///
/// These never originate from cart operations - the cart coerces its inputs.
/// They exist so the Catalog Provider glue can reject bad backend data
/// (most importantly ambiguous tier sets) before it reaches the cart.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two tiers with the same breakpoint).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

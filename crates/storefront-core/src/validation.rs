//! # Validation Module
//!
//! Catalog ingestion boundary checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Backend                                                       │
//! │  └── Owns catalog data; SHOULD never send ambiguous tier sets          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog Provider glue (Rust)                                 │
//! │  └── THIS MODULE: screens fetched items before they reach the cart     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart Store                                                    │
//! │  └── NO validation by contract - coerces quantities, accepts any code  │
//! │                                                                         │
//! │  The cart stays infallible because bad data is stopped one layer up.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_item_code, validate_quantity};
//!
//! // Screen an item code fetched from the backend
//! validate_item_code("A001").unwrap();
//!
//! // Screen a quantity typed on the product screen
//! validate_quantity(5).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::PriceTier;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a backend item code.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 50 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_item_code;
///
/// assert!(validate_item_code("A001").is_ok());
/// assert!(validate_item_code("").is_err());
/// ```
pub fn validate_item_code(item_code: &str) -> ValidationResult<()> {
    let item_code = item_code.trim();

    if item_code.is_empty() {
        return Err(ValidationError::Required {
            field: "itemCode".to_string(),
        });
    }

    if item_code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "itemCode".to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed on the product screen.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Note
/// The Cart Store itself does NOT call this: by contract it coerces
/// non-positive quantities into removals. This check is for screens that
/// want to reject a "0" keystroke before it turns into a silent delete.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Tier Set Validator
// =============================================================================

/// Validates a tier set fetched from the catalog.
///
/// ## Rules
/// - Every `min_quantity` must be >= 1
/// - No negative `unit_price`
/// - `min_quantity` must be unique across the set
///
/// ## Why Uniqueness?
/// Two tiers with the same breakpoint make resolution order-dependent. The
/// resolver stays deterministic (last wins), but duplicate breakpoints are a
/// data error and should be rejected here, at the ingestion boundary, rather
/// than resolved downstream.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::types::{DiscountRate, PriceTier};
/// use storefront_core::validation::validate_tier_set;
///
/// let tiers = vec![PriceTier {
///     min_quantity: 10,
///     unit_price: Money::from_cents(900),
///     discount: DiscountRate::from_bps(1000),
///     expires_at: None,
/// }];
/// assert!(validate_tier_set(&tiers).is_ok());
/// ```
pub fn validate_tier_set(tiers: &[PriceTier]) -> ValidationResult<()> {
    let mut seen = std::collections::HashSet::new();

    for tier in tiers {
        if tier.min_quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "minQuantity".to_string(),
            });
        }

        if tier.unit_price.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "unitPrice".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        if !seen.insert(tier.min_quantity) {
            return Err(ValidationError::Duplicate {
                field: "minQuantity".to_string(),
                value: tier.min_quantity.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

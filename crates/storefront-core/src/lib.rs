//! # storefront-core: Pure Business Logic for the Storefront Client
//!
//! This crate is the **heart** of the storefront client. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Frontend (TypeScript)                    │   │
//! │  │   Catalog UI ──► Product Detail ──► Cart UI ──► Order UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated bindings                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ storefront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ CatalogItem│ │   Money   │  │   tier    │  │   rules   │  │   │
//! │  │   │ PriceTier │  │ arithmetic│  │ resolution│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-cart (Cart Store)                    │   │
//! │  │        cart collection, snapshot persistence, restore           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, PriceTier, Customer)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Volume-tier unit price resolution
//! - [`error`] - Validation error types
//! - [`validation`] - Catalog ingestion boundary checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::pricing::resolve_unit_price;
//! use storefront_core::types::{DiscountRate, PriceTier};
//!
//! let base = Money::from_cents(10_00); // L.10.00
//! let tiers = vec![PriceTier {
//!     min_quantity: 10,
//!     unit_price: Money::from_cents(9_00),
//!     discount: DiscountRate::from_bps(1000), // 10%
//!     expires_at: None,
//! }];
//!
//! // Below the breakpoint the base price applies
//! assert_eq!(resolve_unit_price(base, &tiers, 5), base);
//! // At and above the breakpoint the tier price applies
//! assert_eq!(resolve_unit_price(base, &tiers, 10).cents(), 9_00);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use pricing::resolve_unit_price;
pub use types::*;

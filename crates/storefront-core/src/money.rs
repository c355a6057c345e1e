//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The backend quotes prices like L.9.99; multiply by a quantity of 49   │
//! │  in floats and the line total drifts by fractions of a centavo.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    Every price is an i64 count of the smallest currency unit.          │
//! │    Line totals are exact products; cart totals are exact sums.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_cents(10_99); // L.10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // L.21.98
//! let total = price + Money::from_cents(5_00);  // L.15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit
/// (centavos of Lempira for this deployment).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes, corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// CatalogItem.base_price ──┬──► CartLine.unit_price ──► CartLine.line_total()
///                          │
/// PriceTier.unit_price ────┘
///
/// Cart total = Σ line totals ──► order submission amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(10_99); // Represents L.10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (Lempiras) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.cents(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2_99); // L.2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 8_97); // L.8.97
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Harina 1kg  L.2.99
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: L.8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logging and debugging. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}L.{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

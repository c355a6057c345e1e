//! # Pricing Module
//!
//! Volume-tier unit price resolution.
//!
//! ## Resolution Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TIER RESOLUTION (closest-from-below match)                             │
//! │                                                                         │
//! │  base_price: L.10.00                                                    │
//! │  tiers:      [ {min 10 → L.9.00}, {min 50 → L.8.00} ]                   │
//! │                                                                         │
//! │  quantity  5 ──► no tier qualifies ────────► L.10.00 (base)            │
//! │  quantity 10 ──► {min 10} qualifies ───────► L. 9.00                   │
//! │  quantity 49 ──► {min 10} still closest ───► L. 9.00                   │
//! │  quantity 50 ──► {min 50} now closest ─────► L. 8.00                   │
//! │                                                                         │
//! │  Among qualifying tiers, the LARGEST min_quantity wins.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tie-Break
//! Two tiers with the same `min_quantity` are a catalog data anomaly. The
//! resolver is still deterministic: the last one encountered in the supplied
//! slice wins. Catalogs should be screened with
//! [`crate::validation::validate_tier_set`] so ambiguous sets are rejected at
//! the ingestion boundary instead of silently resolved here.

use crate::money::Money;
use crate::types::PriceTier;

/// Resolves the unit price for `quantity` units of an item.
///
/// Among the tiers whose `min_quantity <= quantity`, selects the one with the
/// largest `min_quantity`; if none qualifies, returns `base_price`. Tier
/// order is irrelevant except for the documented last-wins tie-break on equal
/// `min_quantity`.
///
/// Pure function: no clock, no I/O, expired tiers are NOT filtered here
/// (the backend owns expiry; see [`PriceTier::is_expired`]).
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::resolve_unit_price;
/// use storefront_core::types::{DiscountRate, PriceTier};
///
/// let base = Money::from_cents(50_00);
/// let tiers = vec![PriceTier {
///     min_quantity: 5,
///     unit_price: Money::from_cents(40_00),
///     discount: DiscountRate::from_bps(2000),
///     expires_at: None,
/// }];
///
/// assert_eq!(resolve_unit_price(base, &tiers, 4).cents(), 50_00);
/// assert_eq!(resolve_unit_price(base, &tiers, 5).cents(), 40_00);
/// ```
pub fn resolve_unit_price(base_price: Money, tiers: &[PriceTier], quantity: i64) -> Money {
    let mut resolved = base_price;
    // Base price acts as the quantity-0 breakpoint; tiers have min_quantity >= 1.
    let mut best_min = 0;

    for tier in tiers {
        // `>=` makes the last of two equal breakpoints win (documented tie-break).
        if tier.min_quantity <= quantity && tier.min_quantity >= best_min {
            resolved = tier.unit_price;
            best_min = tier.min_quantity;
        }
    }

    resolved
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountRate;

    fn tier(min_quantity: i64, unit_price_cents: i64) -> PriceTier {
        PriceTier {
            min_quantity,
            unit_price: Money::from_cents(unit_price_cents),
            discount: DiscountRate::zero(),
            expires_at: None,
        }
    }

    #[test]
    fn test_no_tiers_uses_base_price() {
        let base = Money::from_cents(1000);
        assert_eq!(resolve_unit_price(base, &[], 1), base);
        assert_eq!(resolve_unit_price(base, &[], 999), base);
    }

    /// The monotonicity table: base 10, tiers {10: 9, 50: 8}.
    #[test]
    fn test_closest_from_below_match() {
        let base = Money::from_cents(1000);
        let tiers = vec![tier(10, 900), tier(50, 800)];

        assert_eq!(resolve_unit_price(base, &tiers, 5).cents(), 1000);
        assert_eq!(resolve_unit_price(base, &tiers, 10).cents(), 900);
        assert_eq!(resolve_unit_price(base, &tiers, 49).cents(), 900);
        assert_eq!(resolve_unit_price(base, &tiers, 50).cents(), 800);
        assert_eq!(resolve_unit_price(base, &tiers, 500).cents(), 800);
    }

    #[test]
    fn test_tier_order_is_irrelevant() {
        let base = Money::from_cents(1000);
        let ascending = vec![tier(10, 900), tier(50, 800)];
        let descending = vec![tier(50, 800), tier(10, 900)];

        for qty in [1, 9, 10, 11, 49, 50, 51] {
            assert_eq!(
                resolve_unit_price(base, &ascending, qty),
                resolve_unit_price(base, &descending, qty),
                "diverged at quantity {qty}"
            );
        }
    }

    #[test]
    fn test_duplicate_min_quantity_last_wins() {
        let base = Money::from_cents(1000);
        let tiers = vec![tier(10, 900), tier(10, 850)];

        assert_eq!(resolve_unit_price(base, &tiers, 10).cents(), 850);
    }

    #[test]
    fn test_exact_breakpoint_boundary() {
        let base = Money::from_cents(5000);
        let tiers = vec![tier(5, 4000)];

        assert_eq!(resolve_unit_price(base, &tiers, 4).cents(), 5000);
        assert_eq!(resolve_unit_price(base, &tiers, 5).cents(), 4000);
    }

    #[test]
    fn test_expired_tiers_still_resolve() {
        // Expiry filtering belongs to the catalog boundary, not the resolver.
        let base = Money::from_cents(1000);
        let mut expired = tier(10, 900);
        expired.expires_at = Some(chrono::Utc::now() - chrono::Duration::days(30));

        assert_eq!(resolve_unit_price(base, &[expired], 10).cents(), 900);
    }
}

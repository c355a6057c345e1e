//! # Domain Types
//!
//! Core domain types consumed from the backend catalog and customer endpoints.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CatalogItem   │   │    PriceTier    │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_code      │   │  min_quantity   │   │  card_code      │       │
//! │  │  item_name      │   │  unit_price     │   │  card_name      │       │
//! │  │  base_price     │◄──│  discount (bps) │   │  federal_tax_id │       │
//! │  │  tiers[]        │   │  expires_at?    │   │  price_list_num │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  All three are READ-ONLY from the cart's perspective: the catalog      │
//! │  and customer endpoints own them, the cart copies what it needs.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The backend is the source of identity: `item_code` for products and
//! `card_code` for customers. The cart never generates identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (a typical volume-tier discount)
///
/// ## Display Only
/// The rate is metadata for the product screens ("Desde 10u: L.9.00
/// (10% desc)"). Price resolution never derives a price from it - the
/// tier's `unit_price` is already the final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// A volume-discount breakpoint supplied by the catalog.
///
/// If the purchased quantity of an item is `>= min_quantity`, `unit_price`
/// may apply instead of the item's base price. Tiers are immutable; the cart
/// copies them at insertion time so later catalog updates cannot reprice
/// lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceTier {
    /// Minimum quantity for this breakpoint to qualify (>= 1).
    pub min_quantity: i64,

    /// Unit price in centavos that applies at this breakpoint.
    pub unit_price: Money,

    /// Discount relative to the base price, in basis points. Display only.
    pub discount: DiscountRate,

    /// When this tier stops being offered, if the backend set an expiry.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl PriceTier {
    /// Whether the tier has expired as of `now`.
    ///
    /// ## Note
    /// Expiry is a catalog/display concern: the backend stops sending expired
    /// tiers, and the product screens can grey them out. Price resolution
    /// deliberately ignores expiry - see [`crate::pricing::resolve_unit_price`].
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => expiry < now,
            None => false,
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A product as supplied by the catalog endpoint, including its volume tiers.
///
/// Read-only from the cart's perspective. When an item is added to the cart,
/// the fields the cart needs are copied into the line item (snapshot
/// semantics), so this type can be dropped or refreshed freely afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    /// Backend item code - unique business identifier.
    pub item_code: String,

    /// Display name shown on catalog and cart screens.
    pub item_name: String,

    /// Product group code (backend classification).
    pub group_code: i64,

    /// Product group name.
    pub group_name: String,

    /// Units currently in stock.
    pub in_stock: i64,

    /// Units committed to other orders.
    pub committed: i64,

    /// Base unit price in centavos; applies when no tier qualifies.
    pub base_price: Money,

    /// Volume-discount breakpoints. Order is irrelevant to resolution.
    pub tiers: Vec<PriceTier>,

    /// Whether the backend flagged this item as discounted (badge on the UI).
    pub has_discount: bool,
}

// =============================================================================
// Customer
// =============================================================================

/// The customer a salesperson is currently building an order for.
///
/// Supplied by the customer-selection screen; the cart caches it alongside
/// the line items purely for display continuity across app restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    /// Backend card code - unique business identifier.
    pub card_code: String,

    /// Customer display name.
    pub card_name: String,

    /// Tax registration number (RTN).
    pub federal_tax_id: String,

    /// Price list the backend resolves prices against for this customer.
    /// Affects catalog prices upstream, before data reaches the cart.
    pub price_list_num: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_discount_rate_conversions() {
        let rate = DiscountRate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert_eq!(rate.percentage(), 20.0);

        let from_pct = DiscountRate::from_percentage(8.25);
        assert_eq!(from_pct.bps(), 825);
    }

    #[test]
    fn test_tier_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();

        let open_ended = PriceTier {
            min_quantity: 10,
            unit_price: Money::from_cents(900),
            discount: DiscountRate::from_bps(1000),
            expires_at: None,
        };
        assert!(!open_ended.is_expired(now));

        let expired = PriceTier {
            expires_at: Some(past),
            ..open_ended.clone()
        };
        assert!(expired.is_expired(now));

        let running = PriceTier {
            expires_at: Some(future),
            ..open_ended
        };
        assert!(!running.is_expired(now));
    }

    #[test]
    fn test_catalog_item_camel_case_wire_shape() {
        let json = r#"{
            "itemCode": "A001",
            "itemName": "Harina 1kg",
            "groupCode": 4,
            "groupName": "Abarrotes",
            "inStock": 120,
            "committed": 8,
            "basePrice": 1000,
            "tiers": [
                { "minQuantity": 10, "unitPrice": 900, "discount": 1000, "expiresAt": null }
            ],
            "hasDiscount": true
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_code, "A001");
        assert_eq!(item.base_price.cents(), 1000);
        assert_eq!(item.tiers.len(), 1);
        assert_eq!(item.tiers[0].min_quantity, 10);
    }
}

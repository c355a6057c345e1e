//! # Cart Collection
//!
//! The pure in-memory cart: line items keyed by item code, plus the cached
//! customer selection.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Operation               Cart Change           │
//! │  ───────────────          ─────────               ───────────           │
//! │                                                                         │
//! │  Pick quantity ──────────► add_or_update() ─────► upsert line           │
//! │                                                                         │
//! │  Edit cart quantity ─────► set_quantity() ──────► reprice line          │
//! │                                                                         │
//! │  Swipe to delete ────────► remove() ────────────► drop line             │
//! │                                                                         │
//! │  Order submitted ────────► clear() ─────────────► drop all lines        │
//! │                                                                         │
//! │  Pick customer ──────────► set_selected_customer()                      │
//! │                                                                         │
//! │  NOTE: every operation is infallible. Quantities <= 0 mean "remove",    │
//! │        unknown item codes are no-ops. Nothing is ever rejected.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{resolve_unit_price, CatalogItem, Customer, Money, PriceTier};

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the cart, corresponding to exactly one product.
///
/// ## Design Notes
/// - Catalog fields are COPIED at insertion time (snapshot semantics), so
///   the cart displays consistent data even if the catalog is refetched
///   after the item was added.
/// - The tier table is copied too: `set_quantity` re-resolves the unit price
///   from the line's own tiers, without going back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Backend item code (unique within the cart).
    pub item_code: String,

    /// Product name at time of adding (frozen).
    pub item_name: String,

    /// Product group code at time of adding (frozen).
    pub group_code: i64,

    /// Product group name at time of adding (frozen).
    pub group_name: String,

    /// Stock level at time of adding (display only).
    pub in_stock: i64,

    /// Committed units at time of adding (display only).
    pub committed: i64,

    /// Base unit price at time of adding (frozen).
    pub base_price: Money,

    /// Volume tiers at time of adding (frozen); used to reprice on
    /// quantity changes.
    pub tiers: Vec<PriceTier>,

    /// Discount badge flag at time of adding.
    pub has_discount: bool,

    /// Quantity in cart (always >= 1; a line at 0 would have been removed).
    pub quantity: i64,

    /// Resolved unit price at time of last quantity update.
    pub unit_price: Money,

    /// When this line was first added to the cart.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a catalog item, a quantity, and the
    /// unit price already resolved for that quantity.
    pub fn from_catalog(item: &CatalogItem, quantity: i64, unit_price: Money) -> Self {
        CartLine {
            item_code: item.item_code.clone(),
            item_name: item.item_name.clone(),
            group_code: item.group_code,
            group_name: item.group_name.clone(),
            in_stock: item.in_stock,
            committed: item.committed,
            base_price: item.base_price,
            tiers: item.tiers.clone(),
            has_discount: item.has_discount,
            quantity,
            unit_price,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    ///
    /// Computed rather than stored, so `line_total == unit_price × quantity`
    /// holds by construction and can never drift.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart: an order-irrelevant collection of lines keyed by item code,
/// plus the cached customer selection.
///
/// ## Invariants
/// - At most one line per `item_code` (adding the same product replaces it)
/// - Every line has `quantity >= 1`; updating a quantity to 0 or below
///   removes the line rather than leaving a zero-quantity record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    selected_customer: Option<Customer>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Upserts a line for a catalog item at the given quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line if present, otherwise no-op
    /// - line exists: REPLACES it (fresh catalog copy, re-resolved price) -
    ///   this is an idempotent upsert, not an additive increment
    /// - line absent: inserts a new one
    ///
    /// The unit price is resolved from the supplied item's tiers
    /// (closest-from-below breakpoint, base price fallback).
    ///
    /// Any non-empty item code is accepted; the cart does not validate
    /// against the catalog.
    pub fn add_or_update(&mut self, item: &CatalogItem, quantity: i64) {
        let existing = self
            .lines
            .iter()
            .position(|line| line.item_code == item.item_code);

        if quantity <= 0 {
            if let Some(index) = existing {
                self.lines.remove(index);
            }
            return;
        }

        let unit_price = resolve_unit_price(item.base_price, &item.tiers, quantity);

        match existing {
            Some(index) => {
                // Keep the original added_at: the line was replaced, not re-added.
                let added_at = self.lines[index].added_at;
                let mut line = CartLine::from_catalog(item, quantity, unit_price);
                line.added_at = added_at;
                self.lines[index] = line;
            }
            None => self
                .lines
                .push(CartLine::from_catalog(item, quantity, unit_price)),
        }
    }

    /// Sets the quantity of an EXISTING line, repricing it from the line's
    /// stored tiers.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - unknown item code: no-op (never creates a line)
    pub fn set_quantity(&mut self, item_code: &str, quantity: i64) {
        let Some(index) = self
            .lines
            .iter()
            .position(|line| line.item_code == item_code)
        else {
            return;
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return;
        }

        let line = &mut self.lines[index];
        line.quantity = quantity;
        line.unit_price = resolve_unit_price(line.base_price, &line.tiers, quantity);
    }

    /// Removes a line by item code. Idempotent: no-op if absent.
    pub fn remove(&mut self, item_code: &str) {
        self.lines.retain(|line| line.item_code != item_code);
    }

    /// Empties the cart. Idempotent.
    ///
    /// The customer selection survives: after an order is submitted the cart
    /// is cleared but the salesperson keeps working with the same customer.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replaces the cached customer selection.
    pub fn set_selected_customer(&mut self, customer: Customer) {
        self.selected_customer = Some(customer);
    }

    /// Clears the cached customer selection.
    pub fn clear_selected_customer(&mut self) {
        self.selected_customer = None;
    }

    /// Returns the current lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by item code.
    pub fn get(&self, item_code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_code == item_code)
    }

    /// Returns the cached customer selection.
    pub fn selected_customer(&self) -> Option<&Customer> {
        self.selected_customer.as_ref()
    }

    /// Returns the number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Calculates the cart total: the sum of all line totals.
    /// Zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // Snapshot conversions live in snapshot.rs via From impls.
    pub(crate) fn from_parts(lines: Vec<CartLine>, selected_customer: Option<Customer>) -> Self {
        Cart {
            lines,
            selected_customer,
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the cart screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

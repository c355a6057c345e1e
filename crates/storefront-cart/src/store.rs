//! # Cart Store
//!
//! The handle the presentation layer talks to: owns the mutable cart state
//! and the background snapshot writer.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Lifecycle                                │
//! │                                                                         │
//! │  App start ──► CartStore::restore(store).await                         │
//! │                      │                                                  │
//! │                      │  loads snapshot (missing/corrupt ⇒ empty cart)  │
//! │                      │  spawns the snapshot writer task                 │
//! │                      ▼                                                  │
//! │                 ┌─────────┐   add_or_update / set_quantity /           │
//! │                 │ running │◄─ remove / clear / customer ops            │
//! │                 └────┬────┘   (sync in-memory, snapshot enqueued)      │
//! │                      │                                                  │
//! │  App exit ──► store.shutdown().await                                   │
//! │                      │  drains the queue, joins the writer             │
//! │                      ▼                                                  │
//! │                 all pending writes on disk                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Mutations are synchronous with respect to in-memory state: they lock the
//! mutex, mutate, take a snapshot, and enqueue it - no await, no blocking
//! I/O on the caller. The single writer task applies snapshots strictly in
//! send order, coalescing backlog to the latest, so storage always holds a
//! state that existed in memory (some prefix of the mutation sequence).
//!
//! ## Failure Semantics
//! A failed snapshot write is logged and otherwise ignored: the in-memory
//! cart stays authoritative for the session, and the next mutation persists
//! the full current state again (natural retry).

use std::sync::Mutex;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use storefront_core::{CatalogItem, Customer, Money};

use crate::cart::{Cart, CartLine, CartTotals};
use crate::snapshot::{CartSnapshot, SnapshotStore, SNAPSHOT_SCHEMA_VERSION};

// =============================================================================
// Writer Task
// =============================================================================

enum WriterMessage {
    Persist(CartSnapshot),
    Flush(oneshot::Sender<()>),
}

/// Applies snapshots to storage strictly in send order.
///
/// Rapid successive mutations are coalesced: when a backlog has built up,
/// only the newest snapshot is written - the intermediate states are
/// strictly older versions of the same cart, so skipping them still leaves
/// storage at a state that existed in memory. Writes are never interleaved
/// because this task is the only writer.
async fn run_writer<S: SnapshotStore>(store: S, mut rx: mpsc::UnboundedReceiver<WriterMessage>) {
    while let Some(message) = rx.recv().await {
        match message {
            WriterMessage::Persist(snapshot) => {
                let mut latest = snapshot;
                let mut pending_acks = Vec::new();

                // Coalesce the backlog. Flushes queued behind a pending
                // persist must only ack once that state has been written.
                while let Ok(next) = rx.try_recv() {
                    match next {
                        WriterMessage::Persist(snapshot) => latest = snapshot,
                        WriterMessage::Flush(ack) => pending_acks.push(ack),
                    }
                }

                if let Err(err) = store.save(&latest).await {
                    warn!(
                        error = %err,
                        "cart snapshot write failed; in-memory cart stays authoritative"
                    );
                }

                for ack in pending_acks {
                    let _ = ack.send(());
                }
            }
            WriterMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    debug!("cart snapshot writer stopped");
}

// =============================================================================
// Cart Store
// =============================================================================

/// Single source of truth for the current cart and customer selection.
///
/// Explicitly constructed via [`CartStore::restore`] and torn down via
/// [`CartStore::shutdown`] - there is no module-level singleton. The
/// presentation layer holds this handle (or an `Arc` of it) and goes through
/// the operations below; it never mutates state directly.
///
/// ## Thread Safety
/// State lives behind a `std::sync::Mutex`: cart operations are quick,
/// in-memory, and issued from a single logical UI thread, so there is
/// nothing to gain from an async lock or an `RwLock`.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    tx: mpsc::UnboundedSender<WriterMessage>,
    writer: JoinHandle<()>,
}

impl CartStore {
    /// Restores the cart from the snapshot store and spawns the writer task.
    ///
    /// One-time startup step. A missing snapshot, an unreadable/corrupt one,
    /// or one written by a newer app version all log a warning and start
    /// empty - restore never fails. Until this returns there is no handle,
    /// so early readers cannot observe a partially loaded cart.
    pub async fn restore<S: SnapshotStore>(store: S) -> CartStore {
        let cart = match store.load().await {
            Ok(Some(snapshot)) => {
                if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
                    warn!(
                        version = snapshot.schema_version,
                        "cart snapshot written by a newer app version; starting empty"
                    );
                    Cart::new()
                } else {
                    debug!(lines = snapshot.products.len(), "cart snapshot restored");
                    Cart::from(snapshot)
                }
            }
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "cart snapshot unreadable; starting empty");
                Cart::new()
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(store, rx));

        CartStore {
            cart: Mutex::new(cart),
            tx,
            writer,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Upserts a line for a catalog item at the given quantity.
    /// See [`Cart::add_or_update`] for the coercion rules.
    pub fn add_or_update(&self, item: &CatalogItem, quantity: i64) {
        debug!(item_code = %item.item_code, quantity, "add_or_update");
        self.mutate(|cart| cart.add_or_update(item, quantity));
    }

    /// Sets the quantity of an existing line, repricing it from the line's
    /// stored tiers. See [`Cart::set_quantity`] for the coercion rules.
    pub fn set_quantity(&self, item_code: &str, quantity: i64) {
        debug!(item_code = %item_code, quantity, "set_quantity");
        self.mutate(|cart| cart.set_quantity(item_code, quantity));
    }

    /// Removes a line by item code. Idempotent.
    pub fn remove(&self, item_code: &str) {
        debug!(item_code = %item_code, "remove");
        self.mutate(|cart| cart.remove(item_code));
    }

    /// Empties the cart (the customer selection survives). Idempotent.
    pub fn clear(&self) {
        debug!("clear cart");
        self.mutate(Cart::clear);
    }

    /// Replaces the cached customer selection.
    pub fn set_selected_customer(&self, customer: Customer) {
        debug!(card_code = %customer.card_code, "set_selected_customer");
        self.mutate(|cart| cart.set_selected_customer(customer));
    }

    /// Clears the cached customer selection.
    pub fn clear_selected_customer(&self) {
        debug!("clear_selected_customer");
        self.mutate(Cart::clear_selected_customer);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current cart lines (order-irrelevant).
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().lines().to_vec()
    }

    /// Looks up a single line by item code.
    pub fn get(&self, item_code: &str) -> Option<CartLine> {
        self.lock().get(item_code).cloned()
    }

    /// The cached customer selection, if any.
    pub fn selected_customer(&self) -> Option<Customer> {
        self.lock().selected_customer().cloned()
    }

    /// The cart total: sum of all line totals. Zero for an empty cart.
    /// Pure read, no side effects.
    pub fn total(&self) -> Money {
        self.lock().total()
    }

    /// Totals summary for the cart screen.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.lock())
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // -------------------------------------------------------------------------
    // Persistence Control
    // -------------------------------------------------------------------------

    /// Waits until every snapshot enqueued before this call has been applied
    /// to storage (successfully or not).
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WriterMessage::Flush(ack_tx)).is_ok() {
            // Writer dropping the ack (task aborted) just ends the wait.
            let _ = ack_rx.await;
        }
    }

    /// Completes all pending snapshot writes and stops the writer task.
    ///
    /// Call before clean process exit; afterwards the handle is gone and no
    /// further mutations are possible.
    pub async fn shutdown(self) {
        // Closing the channel lets the writer drain the queue and stop.
        drop(self.tx);
        if let Err(err) = self.writer.await {
            warn!(error = %err, "cart snapshot writer did not stop cleanly");
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart mutex poisoned")
    }

    /// Runs a mutation and enqueues the post-mutation snapshot.
    ///
    /// The snapshot is taken under the same lock as the mutation, so the
    /// writer queue always receives states in the exact order they existed
    /// in memory.
    fn mutate(&self, op: impl FnOnce(&mut Cart)) {
        let snapshot = {
            let mut cart = self.lock();
            op(&mut cart);
            CartSnapshot::from(&*cart)
        };

        if self.tx.send(WriterMessage::Persist(snapshot)).is_err() {
            warn!("cart snapshot writer is gone; changes will not be persisted");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FileSnapshotStore, MemorySnapshotStore};
    use storefront_core::{DiscountRate, PriceTier};

    fn item(code: &str, base_price_cents: i64, tiers: Vec<PriceTier>) -> CatalogItem {
        CatalogItem {
            item_code: code.to_string(),
            item_name: format!("Item {}", code),
            group_code: 1,
            group_name: "Abarrotes".to_string(),
            in_stock: 100,
            committed: 0,
            base_price: Money::from_cents(base_price_cents),
            tiers,
            has_discount: false,
        }
    }

    fn tier(min_quantity: i64, unit_price_cents: i64) -> PriceTier {
        PriceTier {
            min_quantity,
            unit_price: Money::from_cents(unit_price_cents),
            discount: DiscountRate::from_bps(2000),
            expires_at: None,
        }
    }

    fn customer(code: &str) -> Customer {
        Customer {
            card_code: code.to_string(),
            card_name: format!("Cliente {}", code),
            federal_tax_id: "08011985123960".to_string(),
            price_list_num: Some("2".to_string()),
        }
    }

    #[tokio::test]
    async fn test_fresh_store_restores_empty() {
        let store = CartStore::restore(MemorySnapshotStore::new()).await;
        assert!(store.is_empty());
        assert_eq!(store.total(), Money::zero());
        assert!(store.selected_customer().is_none());
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_tier_scenario_through_store() {
        let store = CartStore::restore(MemorySnapshotStore::new()).await;
        store.add_or_update(&item("B", 50_00, vec![tier(5, 40_00)]), 5);

        let line = store.get("B").unwrap();
        assert_eq!(line.unit_price.cents(), 40_00);
        assert_eq!(line.line_total().cents(), 200_00);
        assert_eq!(store.total().cents(), 200_00);
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_mutations_reach_storage() {
        let backing = MemorySnapshotStore::new();
        let store = CartStore::restore(backing.clone()).await;

        store.add_or_update(&item("A", 10_00, vec![]), 3);
        store.set_selected_customer(customer("C001"));
        store.flush().await;

        let stored = backing.stored().unwrap();
        assert_eq!(stored.schema_version, SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(stored.products.len(), 1);
        assert_eq!(stored.products[0].item_code, "A");
        assert_eq!(stored.selected_customer.unwrap().card_code, "C001");
        store.shutdown().await;
    }

    /// Persistence round-trip: serialize, "restart", deserialize - same
    /// lines (code, quantity, unit price) and same selected customer.
    #[tokio::test]
    async fn test_round_trip_across_restart() {
        let backing = MemorySnapshotStore::new();

        let store = CartStore::restore(backing.clone()).await;
        store.add_or_update(&item("A", 10_00, vec![tier(10, 9_00)]), 12);
        store.add_or_update(&item("B", 7_50, vec![]), 2);
        store.set_selected_customer(customer("C001"));
        store.shutdown().await;

        let restored = CartStore::restore(backing).await;
        assert_eq!(restored.lines().len(), 2);

        let a = restored.get("A").unwrap();
        assert_eq!(a.quantity, 12);
        assert_eq!(a.unit_price.cents(), 9_00);
        let b = restored.get("B").unwrap();
        assert_eq!(b.quantity, 2);
        assert_eq!(b.unit_price.cents(), 7_50);

        assert_eq!(restored.selected_customer().unwrap().card_code, "C001");
        assert_eq!(restored.total().cents(), 12 * 9_00 + 2 * 7_50);

        // Restored lines keep their tier tables, so repricing still works.
        restored.set_quantity("A", 2);
        assert_eq!(restored.get("A").unwrap().unit_price.cents(), 10_00);
        restored.shutdown().await;
    }

    #[tokio::test]
    async fn test_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart-snapshot.json");

        let store = CartStore::restore(FileSnapshotStore::new(&path)).await;
        store.add_or_update(&item("A", 100_00, vec![]), 3);
        store.shutdown().await;

        let restored = CartStore::restore(FileSnapshotStore::new(&path)).await;
        let line = restored.get("A").unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price.cents(), 100_00);
        restored.shutdown().await;
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_restores_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart-snapshot.json");
        tokio::fs::write(&path, b"definitely not json").await.unwrap();

        let store = CartStore::restore(FileSnapshotStore::new(&path)).await;
        assert!(store.is_empty());
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_newer_schema_version_restores_empty() {
        let backing = MemorySnapshotStore::new();
        backing.seed(CartSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION + 1,
            products: vec![],
            selected_customer: Some(customer("C001")),
        });

        let store = CartStore::restore(backing).await;
        assert!(store.is_empty());
        assert!(store.selected_customer().is_none());
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_authoritative() {
        let backing = MemorySnapshotStore::new();
        let store = CartStore::restore(backing.clone()).await;

        backing.set_fail_saves(true);
        store.add_or_update(&item("A", 10_00, vec![]), 3);
        store.flush().await;

        // The write failed but the in-memory cart is untouched.
        assert_eq!(store.get("A").unwrap().quantity, 3);
        assert!(backing.stored().is_none());

        // The next mutation writes the full current state again.
        backing.set_fail_saves(false);
        store.add_or_update(&item("B", 5_00, vec![]), 1);
        store.flush().await;

        let stored = backing.stored().unwrap();
        assert_eq!(stored.products.len(), 2);
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_rapid_mutations_end_at_latest_state() {
        let backing = MemorySnapshotStore::new();
        let store = CartStore::restore(backing.clone()).await;
        let product = item("A", 10_00, vec![]);

        for qty in 1..=50 {
            store.add_or_update(&product, qty);
        }
        store.flush().await;

        // Coalescing may skip intermediates, but storage must hold the
        // final state - a state that existed in memory.
        let stored = backing.stored().unwrap();
        assert_eq!(stored.products[0].quantity, 50);
        assert!(backing.save_count() <= 50);
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_completes_pending_writes() {
        let backing = MemorySnapshotStore::new();
        let store = CartStore::restore(backing.clone()).await;

        store.add_or_update(&item("A", 10_00, vec![]), 7);
        store.clear_selected_customer();
        store.shutdown().await;

        let stored = backing.stored().unwrap();
        assert_eq!(stored.products[0].quantity, 7);
    }

    #[tokio::test]
    async fn test_clear_persists_but_keeps_customer() {
        let backing = MemorySnapshotStore::new();
        let store = CartStore::restore(backing.clone()).await;

        store.add_or_update(&item("A", 10_00, vec![]), 2);
        store.set_selected_customer(customer("C001"));
        store.clear();
        store.flush().await;

        let stored = backing.stored().unwrap();
        assert!(stored.products.is_empty());
        assert_eq!(stored.selected_customer.unwrap().card_code, "C001");
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_totals_summary_through_store() {
        let store = CartStore::restore(MemorySnapshotStore::new()).await;
        store.add_or_update(&item("A", 10_00, vec![]), 2);
        store.add_or_update(&item("B", 5_00, vec![]), 3);

        let totals = store.totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total.cents(), 35_00);
        store.shutdown().await;
    }
}

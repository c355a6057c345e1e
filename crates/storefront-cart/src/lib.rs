//! # storefront-cart: Cart Store for the Storefront Client
//!
//! Single source of truth for "what is currently in the cart", with
//! deterministic pricing resolution and crash-safe persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Store Data Flow                             │
//! │                                                                         │
//! │  Product screen (quantity picked)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-cart (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │     Cart      │    │ SnapshotStore│  │   │
//! │  │   │  (store.rs)   │    │  (cart.rs)    │    │ (snapshot.rs)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Mutex guard   │───►│ CartLine      │───►│ JSON file or │  │   │
//! │  │   │ writer task   │    │ upsert/total  │    │ memory fake  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Device storage (JSON snapshot)                 │   │
//! │  │   { schemaVersion, products: [...], selectedCustomer: {...} }   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart`] - The pure cart collection (lines, upsert, totals)
//! - [`snapshot`] - Snapshot document, `SnapshotStore` trait, backends
//! - [`store`] - `CartStore`: the handle screens talk to
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_cart::{CartStore, FileSnapshotStore};
//!
//! // Restore once at startup; the handle does not exist before restore
//! // completes, so no caller can observe a partially loaded cart.
//! let store = CartStore::restore(FileSnapshotStore::new(snapshot_path)).await;
//!
//! store.add_or_update(&item, 3);
//! let total = store.total();
//!
//! // Guarantee pending snapshot writes hit disk before exiting.
//! store.shutdown().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::SnapshotError;
pub use snapshot::{
    CartSnapshot, FileSnapshotStore, MemorySnapshotStore, SnapshotStore, SNAPSHOT_SCHEMA_VERSION,
};
pub use store::CartStore;

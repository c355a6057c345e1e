//! # Snapshot Persistence
//!
//! The persisted form of the cart and the storage abstraction behind it.
//!
//! ## Persisted Layout
//! A single JSON document under a well-known path:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart-snapshot.json                                                     │
//! │                                                                         │
//! │  {                                                                      │
//! │    "schemaVersion": 1,                                                  │
//! │    "products": [ { "itemCode": "A001", "quantity": 3, ... } ],          │
//! │    "selectedCustomer": { "cardCode": "C001", ... } | null               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Trait?
//! The storage backend is injected into the Cart Store through the narrow
//! [`SnapshotStore`] interface, so the cart logic is testable against
//! [`MemorySnapshotStore`] without a real device-storage backend.
//!
//! ## Ownership
//! The Cart Store exclusively owns writes to the snapshot; no other
//! component may write it directly.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use storefront_core::Customer;
use tokio::fs;

use crate::cart::{Cart, CartLine};
use crate::error::{SnapshotError, SnapshotResult};

/// Current snapshot schema version.
///
/// Written into every snapshot so future layouts can migrate. A snapshot
/// carrying a NEWER version than this build understands is treated like a
/// corrupt one: restore logs a warning and starts empty.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Snapshot Document
// =============================================================================

/// The serialized representation of cart + selected customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Schema version for forward compatibility.
    pub schema_version: u32,

    /// All cart lines at the time of the snapshot.
    pub products: Vec<CartLine>,

    /// The cached customer selection, if any.
    pub selected_customer: Option<Customer>,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            products: cart.lines().to_vec(),
            selected_customer: cart.selected_customer().cloned(),
        }
    }
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        Cart::from_parts(snapshot.products, snapshot.selected_customer)
    }
}

// =============================================================================
// Snapshot Store Trait
// =============================================================================

/// Narrow persistence interface injected into the Cart Store.
///
/// Implementations must tolerate being called from a background task; the
/// returned futures are `Send` so the snapshot writer can run on any
/// runtime worker.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Loads the persisted snapshot.
    ///
    /// `Ok(None)` means "no prior cart" (first launch, or the snapshot was
    /// explicitly cleared). Errors on load are treated as "no prior cart"
    /// by the Cart Store, never as fatal.
    fn load(&self) -> impl Future<Output = SnapshotResult<Option<CartSnapshot>>> + Send;

    /// Persists the snapshot, replacing any previous one.
    fn save(&self, snapshot: &CartSnapshot) -> impl Future<Output = SnapshotResult<()>> + Send;
}

// =============================================================================
// File Snapshot Store
// =============================================================================

/// JSON-document snapshot store backed by the device file system.
///
/// ## Crash Safety
/// Saves write to a sibling temp file and rename it over the target, so a
/// crash mid-write leaves either the previous snapshot or the new one on
/// disk, never a torn document.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { path: path.into() }
    }

    /// The path the snapshot document lives at.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> SnapshotResult<Option<CartSnapshot>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotError::Io(err)),
        }
    }

    async fn save(&self, snapshot: &CartSnapshot) -> SnapshotResult<()> {
        let bytes = serde_json::to_vec(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write-then-rename: the target path always holds a complete document.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &bytes).await?;
        fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

// =============================================================================
// Memory Snapshot Store
// =============================================================================

/// In-memory snapshot store for tests.
///
/// Clones share the same backing slot, so a test can hand one clone to a
/// `CartStore`, shut the store down, and inspect (or restore from) the
/// other clone - simulating an app restart without touching the disk.
///
/// `set_fail_saves` simulates storage write failures to exercise the
/// "in-memory cart stays authoritative" contract.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    snapshot: Mutex<Option<CartSnapshot>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemorySnapshotStore::default()
    }

    /// Seeds the store with a snapshot, as if a previous session wrote it.
    pub fn seed(&self, snapshot: CartSnapshot) {
        *self.inner.snapshot.lock().expect("snapshot mutex poisoned") = Some(snapshot);
    }

    /// Returns the currently stored snapshot, if any.
    pub fn stored(&self) -> Option<CartSnapshot> {
        self.inner
            .snapshot
            .lock()
            .expect("snapshot mutex poisoned")
            .clone()
    }

    /// Makes subsequent `save` calls fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.save_count.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> SnapshotResult<Option<CartSnapshot>> {
        Ok(self.stored())
    }

    async fn save(&self, snapshot: &CartSnapshot) -> SnapshotResult<()> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io(std::io::Error::new(
                ErrorKind::Other,
                "simulated storage write failure",
            )));
        }

        *self.inner.snapshot.lock().expect("snapshot mutex poisoned") = Some(snapshot.clone());
        self.inner.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

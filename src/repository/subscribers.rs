//! Snapshot listener registry.

use crate::types::RepositorySnapshot;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked with every newly published snapshot
pub(crate) type Listener = Arc<dyn Fn(&Arc<RepositorySnapshot>) + Send + Sync>;

/// Registered listeners keyed by registration order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<BTreeMap<u64, Listener>>,
}

impl Listeners {
    fn entries(&self) -> MutexGuard<'_, BTreeMap<u64, Listener>> {
        // A panicking listener never runs under this lock, so the map is intact
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries().insert(id, listener);
        Subscription {
            id,
            listeners: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) -> bool {
        self.entries().remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    /// Invoke every listener with `snapshot`
    ///
    /// Listeners run outside the registry lock so they may subscribe or
    /// unsubscribe from inside the callback. A panicking listener is logged and
    /// skipped; the others still receive the snapshot.
    pub(crate) fn notify(&self, snapshot: &Arc<RepositorySnapshot>) {
        let listeners: Vec<(u64, Listener)> = self
            .entries()
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();
        for (id, listener) in listeners {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))).is_err() {
                tracing::warn!(subscription = id, "Snapshot listener panicked");
            }
        }
    }
}

/// Handle for a registered snapshot listener
///
/// Dropping the handle unsubscribes. An unsubscribe that races with a
/// publish may still observe that one publish.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Stop receiving snapshots
    pub fn unsubscribe(self) {}

    /// Keep the listener registered for the lifetime of the repository
    pub fn detach(mut self) {
        self.listeners = Weak::new();
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.entries().contains_key(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade()
            && listeners.remove(self.id)
        {
            tracing::debug!(subscription = self.id, "Listener unsubscribed");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

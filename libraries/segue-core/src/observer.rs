//! Explicit observer lists
//!
//! Components that announce changes (play mode, transition phases, library
//! reorders) own an `Observers<E>` and callers register callbacks on it
//! directly. There is no ambient event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of callbacks notified synchronously, in subscription order
pub struct Observers<E> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, Callback<E>)>>,
}

impl<E> Observers<E> {
    /// Create an empty observer list
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks().push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    /// Invoke every callback with `event`
    ///
    /// The list is snapshotted first so a callback may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .callbacks()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(event);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks().len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks().is_empty()
    }

    fn callbacks(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Callback<E>)>> {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.len())
            .finish()
    }
}

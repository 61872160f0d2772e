//! Shared input gate
//!
//! One `InputLock` is constructed by the host and cloned into every component
//! that reads or sets it. The transition orchestrator is the only writer; the
//! controls and key dispatcher only read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Gate that suppresses user input while a transition is in flight
#[derive(Debug, Clone, Default)]
pub struct InputLock {
    locked: Arc<AtomicBool>,
}

impl InputLock {
    /// Create an unlocked gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock if it is free
    ///
    /// The lock is released when the returned guard is dropped.
    pub fn try_acquire(&self) -> Option<InputLockGuard> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InputLockGuard {
                locked: Arc::clone(&self.locked),
            })
    }

    /// Whether input is currently suppressed
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Holds the input lock until dropped
#[derive(Debug)]
#[must_use = "the input lock is released as soon as the guard is dropped"]
pub struct InputLockGuard {
    locked: Arc<AtomicBool>,
}

impl Drop for InputLockGuard {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

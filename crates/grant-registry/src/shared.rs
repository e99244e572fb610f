//! Thread-safe handle to a registry.
//!
//! The registry is a state machine that executes one operation at a time.
//! `SharedRegistry` gives several threads a handle to the same registry and
//! serialises their operations through a mutex, so conflicting submissions
//! are resolved by lock acquisition order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use grant_registry_store::{GrantStore, MemoryGrantStore};

use crate::registry::Registry;

/// Cloneable, serialising handle to a [`Registry`].
pub struct SharedRegistry<S: GrantStore = MemoryGrantStore> {
    inner: Arc<Mutex<Registry<S>>>,
}

impl<S: GrantStore> SharedRegistry<S> {
    /// Wrap a registry.
    pub fn new(registry: Registry<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Run a read-only operation.
    pub fn read<R>(&self, f: impl FnOnce(&Registry<S>) -> R) -> R {
        f(&*self.lock())
    }

    /// Run a mutating operation.
    ///
    /// The whole closure runs under the lock, so several registry calls made
    /// inside it are observed by other handles as one step.
    pub fn write<R>(&self, f: impl FnOnce(&mut Registry<S>) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Registry<S>> {
        // Operations never leave state half-updated; a poisoned lock still
        // guards a consistent registry.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: GrantStore> Clone for SharedRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

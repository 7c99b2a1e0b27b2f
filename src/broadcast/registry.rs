//! # Identity-keyed endpoint registry.
//!
//! [`Registry`] is the shared mutable core of a broadcaster: a set of
//! endpoint entries keyed by [`EndpointId`], guarded by a single mutex.
//!
//! ## Rules
//! - The lock is held only to mutate or snapshot the set, never across a
//!   delivery. Fan-out always works on a [`Registry::snapshot`].
//! - Insertion is idempotent on identity: re-inserting an id overwrites the
//!   single existing entry.
//! - Iteration order of a snapshot is unspecified.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::endpoints::EndpointId;
use crate::error::CastError;

/// Mutex-guarded set of endpoint entries keyed by handle identity.
pub(crate) struct Registry<E> {
    entries: Mutex<HashMap<EndpointId, E>>,
}

impl<E: Clone> Registry<E> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts an entry under its identity, overwriting any previous entry
    /// with the same id.
    pub(crate) fn insert(&self, id: EndpointId, entry: E) {
        self.entries.lock().insert(id, entry);
    }

    /// Removes the entry with the given identity.
    pub(crate) fn remove(&self, id: EndpointId) -> Result<(), CastError> {
        match self.entries.lock().remove(&id) {
            Some(_) => Ok(()),
            None => Err(CastError::NotFound),
        }
    }

    /// Atomically captures the current membership.
    pub(crate) fn snapshot(&self) -> Vec<E> {
        self.entries.lock().values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

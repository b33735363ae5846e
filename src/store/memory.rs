//! In-memory store with simulated propagation delay.
//!
//! This adapter exists to make the acquisition protocol's failure modes
//! reproducible: a non-zero propagation delay means every write (create and
//! delete alike) stays invisible to readers until the delay has elapsed,
//! so two writers can both observe "no lock object" and both write. That is
//! the exact race the confirmation read is designed to resolve.
//!
//! Visibility model: per object, a committed value plus a queue of pending
//! writes in initiation order. A reader first promotes every pending write
//! whose delay has elapsed, in order, then observes the committed value.
//! Once racing writes have all propagated, the last-initiated one wins.
//!
//! The store is cheaply cloneable; clones share state, so handles on
//! different threads can race through a single simulated backend.

use super::ObjectStore;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Shared in-memory object store with configurable propagation delay.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<HashMap<String, ObjectState>>>,
    propagation_delay: Duration,
}

#[derive(Debug, Default)]
struct ObjectState {
    committed: Option<String>,
    pending: Vec<PendingWrite>,
}

#[derive(Debug)]
struct PendingWrite {
    visible_at: Instant,
    /// `None` is a pending delete.
    content: Option<String>,
}

impl ObjectState {
    /// Promote pending writes whose delay has elapsed, in initiation order.
    fn settle(&mut self, now: Instant) {
        while self.pending.first().is_some_and(|w| w.visible_at <= now) {
            self.committed = self.pending.remove(0).content;
        }
    }
}

impl InMemoryStore {
    /// A strongly consistent store: writes are visible immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes become visible only after `delay`.
    pub fn with_propagation_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::default(),
            propagation_delay: delay,
        }
    }

    /// The configured propagation delay.
    pub fn propagation_delay(&self) -> Duration {
        self.propagation_delay
    }

    /// Lock the shared map, recovering from a racer that panicked while
    /// holding it (the map itself is always left consistent).
    fn objects(&self) -> std::sync::MutexGuard<'_, HashMap<String, ObjectState>> {
        self.inner.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    fn push_write(&self, key: &str, content: Option<String>) {
        let now = Instant::now();
        let mut objects = self.objects();
        let state = objects.entry(key.to_string()).or_default();
        state.settle(now);
        state.pending.push(PendingWrite {
            visible_at: now + self.propagation_delay,
            content,
        });
        state.settle(now);
    }
}

impl ObjectStore for InMemoryStore {
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut objects = self.objects();
        Ok(objects
            .get_mut(key)
            .map(|state| {
                state.settle(now);
                state.committed.is_some()
            })
            .unwrap_or(false))
    }

    fn create(&self, key: &str, content: &str) -> Result<(), StoreError> {
        self.push_write(key, Some(content.to_string()));
        Ok(())
    }

    fn read(&self, key: &str) -> Result<String, StoreError> {
        let now = Instant::now();
        let mut objects = self.objects();
        objects
            .get_mut(key)
            .and_then(|state| {
                state.settle(now);
                state.committed.clone()
            })
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        // A delete is only legal against the visible state: if readers
        // cannot see the object yet, neither can the deleter.
        if !self.exists(key)? {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.push_write(key, None);
        Ok(())
    }
}

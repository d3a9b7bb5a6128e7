//! In-memory resource store
//!
//! Backs the CRUD routes. Entries live for the process lifetime; ids are
//! handed out sequentially starting at 1 and never reused.

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};

/// A resource that can be built from a request payload.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    type Payload: DeserializeOwned + 'static;

    /// Singular name used in log lines and error messages.
    const KIND: &'static str;

    fn from_payload(id: u64, payload: Self::Payload) -> Self;
}

pub struct ResourceStore<T: Resource> {
    items: DashMap<u64, T>,
    next_id: AtomicU64,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// All entries, ordered by id.
    pub fn list(&self) -> Vec<T> {
        let mut entries: Vec<(u64, T)> = self
            .items
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, item)| item).collect()
    }

    pub fn get(&self, id: u64) -> Option<T> {
        self.items.get(&id).map(|r| r.value().clone())
    }

    pub fn create(&self, payload: T::Payload) -> T {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let item = T::from_payload(id, payload);
        self.items.insert(id, item.clone());
        item
    }

    /// Replace an existing entry. Returns `None` if `id` is unknown.
    pub fn update(&self, id: u64, payload: T::Payload) -> Option<T> {
        let mut entry = self.items.get_mut(&id)?;
        let item = T::from_payload(id, payload);
        *entry = item.clone();
        Some(item)
    }

    pub fn delete(&self, id: u64) -> bool {
        self.items.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Resource> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Asynchronous key-value storage for label sets.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::LabelSet;

/// Errors reported by a label set store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage keyed by label set id.
#[async_trait]
pub trait LabelSetStore: Send + Sync {
    /// Every stored label set, in key order.
    async fn get_all(&self) -> Result<Vec<LabelSet>, StoreError>;

    /// Insert or replace the set with `set.id`.
    async fn put(&self, set: LabelSet) -> Result<(), StoreError>;

    /// Remove the set with `id`. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// In-process store, used by tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryLabelSetStore {
    sets: RwLock<BTreeMap<String, LabelSet>>,
}

impl MemoryLabelSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `sets`.
    pub fn with_sets(sets: impl IntoIterator<Item = LabelSet>) -> Self {
        Self {
            sets: RwLock::new(sets.into_iter().map(|s| (s.id.clone(), s)).collect()),
        }
    }

    /// Number of stored sets.
    pub async fn len(&self) -> usize {
        self.sets.read().await.len()
    }

    /// Whether the store holds no sets.
    pub async fn is_empty(&self) -> bool {
        self.sets.read().await.is_empty()
    }

    /// The stored copy of one set.
    pub async fn get(&self, id: &str) -> Option<LabelSet> {
        self.sets.read().await.get(id).cloned()
    }
}

#[async_trait]
impl LabelSetStore for MemoryLabelSetStore {
    async fn get_all(&self) -> Result<Vec<LabelSet>, StoreError> {
        Ok(self.sets.read().await.values().cloned().collect())
    }

    async fn put(&self, set: LabelSet) -> Result<(), StoreError> {
        self.sets.write().await.insert(set.id.clone(), set);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.sets.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_upsert_and_delete() {
        let store = MemoryLabelSetStore::new();
        store.put(LabelSet::new("b", "Second")).await.unwrap();
        store.put(LabelSet::new("a", "First")).await.unwrap();
        store.put(LabelSet::new("b", "Renamed")).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "a");
        assert_eq!(all[1].name, "Renamed");

        store.delete("a").await.unwrap();
        store.delete("missing").await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.get("a").await.is_none());
    }
}

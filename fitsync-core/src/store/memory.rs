//! In-memory entity store.
//!
//! Backs both store interfaces with a plain map. Used throughout the core
//! tests and as the zero-setup backend for tools that do not need
//! persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::SyncedEntity;
use crate::error::StoreError;
use crate::store::{LocalStore, RemoteStore};

/// Map-backed store keyed by `(owner_id, id)`.
pub struct MemoryStore<E> {
    rows: Mutex<HashMap<(String, Uuid), E>>,
}

impl<E: SyncedEntity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }

    /// Number of rows held, tombstones included.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(entity: &E) -> (String, Uuid) {
        (entity.owner_id().to_string(), entity.id())
    }
}

impl<E: SyncedEntity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: SyncedEntity> LocalStore<E> for MemoryStore<E> {
    async fn create(&self, entity: &E) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let key = Self::key(entity);
        if rows.contains_key(&key) {
            return Err(StoreError::AlreadyExists(entity.id().to_string()));
        }
        rows.insert(key, entity.clone());
        Ok(())
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.get(&(owner_id.to_string(), id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<E> = rows
            .iter()
            .filter(|((owner, _), entity)| {
                owner == owner_id && (include_deleted || !entity.is_deleted())
            })
            .map(|(_, entity)| entity.clone())
            .collect();
        out.sort_by_key(|e| (e.date_modified(), e.id()));
        Ok(out)
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let key = Self::key(entity);
        if !rows.contains_key(&key) {
            return Err(StoreError::NotFound(entity.id().to_string()));
        }
        rows.insert(key, entity.clone());
        Ok(())
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(&Self::key(entity));
        Ok(())
    }
}

// The remote side of a collection behaves identically in memory; network
// failure injection lives in the test wrappers that need it.
#[async_trait]
impl<E: SyncedEntity> RemoteStore<E> for MemoryStore<E> {
    async fn create(&self, entity: &E) -> Result<(), StoreError> {
        LocalStore::create(self, entity).await
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError> {
        LocalStore::get(self, owner_id, id).await
    }

    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError> {
        LocalStore::list(self, owner_id, include_deleted).await
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        LocalStore::update(self, entity).await
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        LocalStore::delete(self, entity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightEntry;
    use chrono::NaiveDate;

    fn entry(owner: &str, kg: f64) -> WeightEntry {
        WeightEntry::new(owner, kg, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store: MemoryStore<WeightEntry> = MemoryStore::new();
        let e = entry("user1", 82.5);
        LocalStore::create(&store, &e).await.unwrap();

        let fetched = LocalStore::get(&store, "user1", e.id).await.unwrap();
        assert_eq!(fetched.weight_kg, 82.5);
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store: MemoryStore<WeightEntry> = MemoryStore::new();
        let e = entry("user1", 82.5);
        LocalStore::create(&store, &e).await.unwrap();

        let err = LocalStore::create(&store, &e).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let store: MemoryStore<WeightEntry> = MemoryStore::new();
        let err = LocalStore::update(&store, &entry("user1", 82.5))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_tombstones_and_owners() {
        let store: MemoryStore<WeightEntry> = MemoryStore::new();
        let live = entry("user1", 82.5);
        let mut dead = entry("user1", 90.0);
        dead.mark_deleted(chrono::Utc::now());
        let other = entry("user2", 70.0);

        LocalStore::create(&store, &live).await.unwrap();
        LocalStore::create(&store, &dead).await.unwrap();
        LocalStore::create(&store, &other).await.unwrap();

        let visible = LocalStore::list(&store, "user1", false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, live.id);

        let all = LocalStore::list(&store, "user1", true).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}

//! Store interfaces for the two sides of every synced collection.
//!
//! Each entity family is persisted twice: once on-device (the cache the UI
//! reads) and once on the server (the copy that survives across devices).
//! Both sides expose the same CRUD surface; concrete backends are injected
//! into managers at construction, one type per store.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::SyncedEntity;
use crate::error::StoreError;

/// Durable on-device store, keyed by entity id within an owner.
#[async_trait]
pub trait LocalStore<E: SyncedEntity>: Send + Sync {
    /// Persists a new entity. Fails with [`StoreError::AlreadyExists`] when
    /// the id is already present.
    async fn create(&self, entity: &E) -> Result<(), StoreError>;

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError>;

    /// Returns all entities for the owner. Tombstoned entities are filtered
    /// out unless `include_deleted` is set.
    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError>;

    /// Replaces an existing entity. The caller is responsible for having set
    /// `date_modified`; nothing is bumped automatically.
    async fn update(&self, entity: &E) -> Result<(), StoreError>;

    /// Physically removes the row. Only meaningful for purging tombstones;
    /// soft deletion goes through `update` with `deleted_at` set.
    async fn delete(&self, entity: &E) -> Result<(), StoreError>;
}

/// Network-accessible store, keyed by owner and entity id.
///
/// Any operation may fail with [`StoreError::Transient`]; callers must not
/// treat a transient failure as the entity being absent.
#[async_trait]
pub trait RemoteStore<E: SyncedEntity>: Send + Sync {
    async fn create(&self, entity: &E) -> Result<(), StoreError>;

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError>;

    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError>;

    async fn update(&self, entity: &E) -> Result<(), StoreError>;

    async fn delete(&self, entity: &E) -> Result<(), StoreError>;
}

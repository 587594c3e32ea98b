//! Domain managers: the caller-facing surface over a pair of stores.
//!
//! Every entity family exposes the same five operations through
//! [`EntityManager`]: `create`, `update`, `delete`, `get`, `list`. Writes go
//! local-first so the UI sees them immediately even when offline; the remote
//! write is best-effort and a failure there degrades the entity to pending
//! sync instead of failing the caller. `list` is the only operation that
//! runs the two-way reconciler; `get` is cache-first with a silent remote
//! fallback and no merge.

mod profile;

pub use profile::{AssetUploader, GymProfileManager};

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entity::SyncedEntity;
use crate::error::StoreError;
use crate::reconcile::{ReconcileOutcome, Reconciler};
use crate::store::{LocalStore, RemoteStore};

/// Generic manager for one entity family.
///
/// Holds no state beyond its two injected stores; callers own any cache
/// lifetime themselves.
pub struct EntityManager<E: SyncedEntity> {
    local: Arc<dyn LocalStore<E>>,
    remote: Arc<dyn RemoteStore<E>>,
}

impl<E: SyncedEntity> EntityManager<E> {
    pub fn new(local: Arc<dyn LocalStore<E>>, remote: Arc<dyn RemoteStore<E>>) -> Self {
        Self { local, remote }
    }

    fn reconciler(&self) -> Reconciler<E> {
        Reconciler::new(self.local.clone(), self.remote.clone())
    }

    /// Persists a freshly-built entity (fresh id, `date_modified` already
    /// set by the constructor). Local failure is surfaced; remote failure
    /// leaves the entity pending sync.
    pub async fn create(&self, entity: &E) -> Result<(), StoreError> {
        self.local.create(entity).await?;
        self.push_best_effort(entity).await;
        Ok(())
    }

    /// Persists a mutation. The caller must have bumped `date_modified`
    /// (usually via [`SyncedEntity::touch`]); staleness is never inferred
    /// here. When the row was only ever known server-side and never cached,
    /// the local write falls back to create semantics.
    pub async fn update(&self, entity: &E) -> Result<(), StoreError> {
        match self.local.update(entity).await {
            Err(StoreError::NotFound(_)) => self.local.create(entity).await?,
            other => other?,
        }
        self.push_best_effort(entity).await;
        Ok(())
    }

    /// Soft-deletes the entity: a tombstoned copy goes through the update
    /// path on both stores so the deletion can propagate during
    /// reconciliation. Returns the tombstone.
    pub async fn delete(&self, entity: &E) -> Result<E, StoreError> {
        let mut tombstone = entity.clone();
        tombstone.mark_deleted(Utc::now());
        self.update(&tombstone).await?;
        Ok(tombstone)
    }

    /// Cache-first read: local, then silent remote fallback with a
    /// best-effort cache backfill. No merge happens here. A tombstoned
    /// entity reads as absent.
    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError> {
        match self.local.get(owner_id, id).await {
            Ok(entity) if !entity.is_deleted() => return Ok(entity),
            // Local tombstone: the UI's source of truth says it is gone.
            Ok(_) => return Err(StoreError::NotFound(id.to_string())),
            Err(error) => {
                debug!(
                    collection = E::COLLECTION,
                    %id,
                    %error,
                    "local miss; falling back to remote"
                );
            }
        }

        let entity = self.remote.get(owner_id, id).await?;

        // Backfill the cache, tombstones included so deletions propagate.
        if let Err(error) = self.upsert_local(&entity).await {
            debug!(collection = E::COLLECTION, %id, %error, "cache backfill failed");
        }

        if entity.is_deleted() {
            Err(StoreError::NotFound(id.to_string()))
        } else {
            Ok(entity)
        }
    }

    /// Reconciled read of the owner's full live collection. On a transient
    /// remote failure the local cache is served instead; a hard failure
    /// needs both stores to fail.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<E>, StoreError> {
        match self.reconcile(owner_id).await {
            Ok(outcome) => Ok(outcome.entities),
            Err(error) if error.is_transient() => {
                debug!(
                    collection = E::COLLECTION,
                    owner_id,
                    %error,
                    "remote unreachable; serving local cache"
                );
                self.local.list(owner_id, false).await
            }
            Err(error) => Err(error),
        }
    }

    /// Runs one reconciliation pass and returns the full outcome. `list` is
    /// a convenience over this.
    pub async fn reconcile(&self, owner_id: &str) -> Result<ReconcileOutcome<E>, StoreError> {
        let outcome = self.reconciler().reconcile(owner_id).await?;
        if outcome.failed() > 0 {
            warn!(
                collection = E::COLLECTION,
                owner_id,
                failed = outcome.failed(),
                "some entities could not be reconciled"
            );
        }
        Ok(outcome)
    }

    async fn upsert_local(&self, entity: &E) -> Result<(), StoreError> {
        match self.local.create(entity).await {
            Err(StoreError::AlreadyExists(_)) => self.local.update(entity).await,
            other => other,
        }
    }

    /// Remote write that never fails the caller: the entity stays in
    /// local-only state and the next reconciliation pass retries it.
    async fn push_best_effort(&self, entity: &E) {
        let result = match self.remote.update(entity).await {
            Err(StoreError::NotFound(_)) => self.remote.create(entity).await,
            other => other,
        };
        if let Err(error) = result {
            warn!(
                collection = E::COLLECTION,
                id = %entity.id(),
                %error,
                "remote write failed; entity pending sync"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealLog, MealType, WeightEntry};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn entry(owner: &str, kg: f64) -> WeightEntry {
        WeightEntry::new(owner, kg, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn manager() -> (
        Arc<MemoryStore<WeightEntry>>,
        Arc<MemoryStore<WeightEntry>>,
        EntityManager<WeightEntry>,
    ) {
        let local = Arc::new(MemoryStore::new());
        let remote = Arc::new(MemoryStore::new());
        let mgr = EntityManager::new(
            local.clone() as Arc<dyn LocalStore<WeightEntry>>,
            remote.clone() as Arc<dyn RemoteStore<WeightEntry>>,
        );
        (local, remote, mgr)
    }

    /// Remote that refuses every operation with a transient error.
    struct UnreachableRemote;

    #[async_trait]
    impl<E: SyncedEntity> RemoteStore<E> for UnreachableRemote {
        async fn create(&self, _entity: &E) -> Result<(), StoreError> {
            Err(StoreError::Transient("no route to host".into()))
        }

        async fn get(&self, _owner_id: &str, _id: Uuid) -> Result<E, StoreError> {
            Err(StoreError::Transient("no route to host".into()))
        }

        async fn list(&self, _owner_id: &str, _include_deleted: bool) -> Result<Vec<E>, StoreError> {
            Err(StoreError::Transient("no route to host".into()))
        }

        async fn update(&self, _entity: &E) -> Result<(), StoreError> {
            Err(StoreError::Transient("no route to host".into()))
        }

        async fn delete(&self, _entity: &E) -> Result<(), StoreError> {
            Err(StoreError::Transient("no route to host".into()))
        }
    }

    #[tokio::test]
    async fn test_create_reaches_both_stores() {
        let (local, remote, mgr) = manager();
        let e = entry("user1", 82.0);

        mgr.create(&e).await.unwrap();

        assert!(LocalStore::get(&*local, "user1", e.id).await.is_ok());
        assert!(RemoteStore::get(&*remote, "user1", e.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_survives_remote_outage_and_is_readable() {
        let local = Arc::new(MemoryStore::new());
        let mgr = EntityManager::new(
            local.clone() as Arc<dyn LocalStore<WeightEntry>>,
            Arc::new(UnreachableRemote) as Arc<dyn RemoteStore<WeightEntry>>,
        );
        let e = entry("user1", 82.0);

        // Remote is down, the caller still succeeds.
        mgr.create(&e).await.unwrap();

        // Read-your-write: the entry is immediately visible.
        let fetched = mgr.get("user1", e.id).await.unwrap();
        assert_eq!(fetched.weight_kg, 82.0);
    }

    #[tokio::test]
    async fn test_pending_sync_entry_reaches_remote_on_next_list() {
        let local = Arc::new(MemoryStore::new());
        let remote = Arc::new(MemoryStore::new());

        // Created while offline.
        let offline_mgr = EntityManager::new(
            local.clone() as Arc<dyn LocalStore<WeightEntry>>,
            Arc::new(UnreachableRemote) as Arc<dyn RemoteStore<WeightEntry>>,
        );
        let e = entry("user1", 82.0);
        offline_mgr.create(&e).await.unwrap();
        assert!(RemoteStore::get(&*remote, "user1", e.id).await.is_err());

        // Connectivity restored: the next reconciled read pushes it up.
        let online_mgr = EntityManager::new(
            local.clone() as Arc<dyn LocalStore<WeightEntry>>,
            remote.clone() as Arc<dyn RemoteStore<WeightEntry>>,
        );
        let listed = online_mgr.list("user1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(RemoteStore::get(&*remote, "user1", e.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_falls_back_to_create_when_never_cached() {
        let (local, _remote, mgr) = manager();

        // Known server-side only; the local row does not exist yet.
        let mut e = entry("user1", 82.0);
        e.touch();
        mgr.update(&e).await.unwrap();

        assert!(LocalStore::get(&*local, "user1", e.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_is_a_tombstone_not_a_removal() {
        let (local, remote, mgr) = manager();
        let e = entry("user1", 82.0);
        mgr.create(&e).await.unwrap();

        let tombstone = mgr.delete(&e).await.unwrap();
        assert!(tombstone.is_deleted());

        // Both stores still hold the row, marked deleted.
        assert!(LocalStore::get(&*local, "user1", e.id)
            .await
            .unwrap()
            .is_deleted());
        assert!(RemoteStore::get(&*remote, "user1", e.id)
            .await
            .unwrap()
            .is_deleted());

        // Normal reads no longer see it.
        assert!(mgr.get("user1", e.id).await.unwrap_err().is_not_found());
        assert!(mgr.list("user1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_falls_back_to_remote_and_backfills() {
        let (local, remote, mgr) = manager();

        let e = entry("user1", 77.7);
        RemoteStore::create(&*remote, &e).await.unwrap();

        let fetched = mgr.get("user1", e.id).await.unwrap();
        assert_eq!(fetched.weight_kg, 77.7);

        // Next read is served from the cache.
        assert!(LocalStore::get(&*local, "user1", e.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_everywhere_is_not_found_class() {
        let (_local, _remote, mgr) = manager();
        let err = mgr.get("user1", Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_serves_cache_when_remote_unreachable() {
        let local = Arc::new(MemoryStore::new());
        let mgr = EntityManager::new(
            local.clone() as Arc<dyn LocalStore<WeightEntry>>,
            Arc::new(UnreachableRemote) as Arc<dyn RemoteStore<WeightEntry>>,
        );

        let e = entry("user1", 82.0);
        mgr.create(&e).await.unwrap();

        let listed = mgr.list("user1").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_fails_only_when_both_stores_fail() {
        struct BrokenLocal;

        #[async_trait]
        impl<E: SyncedEntity> LocalStore<E> for BrokenLocal {
            async fn create(&self, _entity: &E) -> Result<(), StoreError> {
                Err(StoreError::Storage("disk full".into()))
            }

            async fn get(&self, _owner_id: &str, _id: Uuid) -> Result<E, StoreError> {
                Err(StoreError::Storage("disk full".into()))
            }

            async fn list(
                &self,
                _owner_id: &str,
                _include_deleted: bool,
            ) -> Result<Vec<E>, StoreError> {
                Err(StoreError::Storage("disk full".into()))
            }

            async fn update(&self, _entity: &E) -> Result<(), StoreError> {
                Err(StoreError::Storage("disk full".into()))
            }

            async fn delete(&self, _entity: &E) -> Result<(), StoreError> {
                Err(StoreError::Storage("disk full".into()))
            }
        }

        let mgr: EntityManager<WeightEntry> = EntityManager::new(
            Arc::new(BrokenLocal),
            Arc::new(UnreachableRemote) as Arc<dyn RemoteStore<WeightEntry>>,
        );
        assert!(mgr.list("user1").await.is_err());
    }

    #[tokio::test]
    async fn test_manager_is_generic_across_families() {
        let local = Arc::new(MemoryStore::new());
        let remote = Arc::new(MemoryStore::new());
        let mgr: EntityManager<MealLog> = EntityManager::new(
            local as Arc<dyn LocalStore<MealLog>>,
            remote as Arc<dyn RemoteStore<MealLog>>,
        );

        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let log = MealLog::new("user1", date, MealType::Lunch).with_calories(640);
        mgr.create(&log).await.unwrap();

        let listed = mgr.list("user1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].calories, Some(640));
    }
}

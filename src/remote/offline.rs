//! Stand-in remote used when sync is not configured.

use async_trait::async_trait;
use uuid::Uuid;

use fitsync_core::{AssetUploader, RemoteStore, StoreError, SyncedEntity};

/// Remote store whose every operation fails transiently.
///
/// Wiring this in when no server is configured means managers take exactly
/// the offline code path they take during an outage: writes degrade to
/// pending sync, reads serve the local cache.
pub struct OfflineRemote;

impl OfflineRemote {
    fn unavailable() -> StoreError {
        StoreError::Transient("sync not configured".into())
    }
}

#[async_trait]
impl<E: SyncedEntity> RemoteStore<E> for OfflineRemote {
    async fn create(&self, _entity: &E) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn get(&self, _owner_id: &str, _id: Uuid) -> Result<E, StoreError> {
        Err(Self::unavailable())
    }

    async fn list(&self, _owner_id: &str, _include_deleted: bool) -> Result<Vec<E>, StoreError> {
        Err(Self::unavailable())
    }

    async fn update(&self, _entity: &E) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _entity: &E) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }
}

#[async_trait]
impl AssetUploader for OfflineRemote {
    async fn upload(&self, _bytes: &[u8], _path: &str) -> Result<String, StoreError> {
        Err(Self::unavailable())
    }
}

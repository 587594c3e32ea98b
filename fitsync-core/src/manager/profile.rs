//! Gym profile manager with photo upload.
//!
//! The one domain side effect in the sync core: a profile photo must be
//! uploaded before its URL can be persisted into the entity. An upload
//! failure downgrades the save to "profile without the new photo" instead of
//! failing it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::entity::SyncedEntity;
use crate::error::StoreError;
use crate::manager::EntityManager;
use crate::models::GymProfile;
use crate::reconcile::ReconcileOutcome;
use crate::store::{LocalStore, RemoteStore};

/// Binary asset upload, e.g. to a blob store fronting a CDN.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Uploads `bytes` under `path` and returns the public URL.
    async fn upload(&self, bytes: &[u8], path: &str) -> Result<String, StoreError>;
}

/// Manager for gym profiles, layering photo upload over the generic manager.
pub struct GymProfileManager {
    entities: EntityManager<GymProfile>,
    uploader: Arc<dyn AssetUploader>,
}

impl GymProfileManager {
    pub fn new(
        local: Arc<dyn LocalStore<GymProfile>>,
        remote: Arc<dyn RemoteStore<GymProfile>>,
        uploader: Arc<dyn AssetUploader>,
    ) -> Self {
        Self {
            entities: EntityManager::new(local, remote),
            uploader,
        }
    }

    pub async fn create(&self, profile: &GymProfile) -> Result<(), StoreError> {
        self.entities.create(profile).await
    }

    pub async fn update(&self, profile: &GymProfile) -> Result<(), StoreError> {
        self.entities.update(profile).await
    }

    pub async fn delete(&self, profile: &GymProfile) -> Result<GymProfile, StoreError> {
        self.entities.delete(profile).await
    }

    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<GymProfile, StoreError> {
        self.entities.get(owner_id, id).await
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<GymProfile>, StoreError> {
        self.entities.list(owner_id).await
    }

    pub async fn reconcile(
        &self,
        owner_id: &str,
    ) -> Result<ReconcileOutcome<GymProfile>, StoreError> {
        self.entities.reconcile(owner_id).await
    }

    /// Saves the profile with a new photo. The upload must complete before
    /// the URL is persisted; when it fails, the profile is saved without the
    /// new photo and keeps whatever `photo_url` it already had.
    pub async fn save_with_photo(
        &self,
        profile: &GymProfile,
        photo: &[u8],
    ) -> Result<GymProfile, StoreError> {
        let mut profile = profile.clone();
        let path = format!("profiles/{}/{}.jpg", profile.owner_id, profile.id);

        match self.uploader.upload(photo, &path).await {
            Ok(url) => profile.photo_url = Some(url),
            Err(error) => {
                warn!(id = %profile.id, %error, "photo upload failed; saving profile without new photo");
            }
        }

        profile.touch();
        self.entities.update(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Mutex;

    struct FakeUploader {
        uploads: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeUploader {
        fn new(fail: bool) -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl AssetUploader for FakeUploader {
        async fn upload(&self, _bytes: &[u8], path: &str) -> Result<String, StoreError> {
            if self.fail {
                return Err(StoreError::Transient("upload timed out".into()));
            }
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(format!("https://cdn.example.com/{}", path))
        }
    }

    fn manager(fail_upload: bool) -> (Arc<FakeUploader>, GymProfileManager) {
        let uploader = Arc::new(FakeUploader::new(fail_upload));
        let mgr = GymProfileManager::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            uploader.clone(),
        );
        (uploader, mgr)
    }

    #[tokio::test]
    async fn test_photo_url_persisted_after_upload() {
        let (uploader, mgr) = manager(false);
        let profile = GymProfile::new("user1", "Iron Temple");
        mgr.create(&profile).await.unwrap();

        let saved = mgr.save_with_photo(&profile, b"jpeg bytes").await.unwrap();

        let url = saved.photo_url.expect("photo url set");
        assert!(url.starts_with("https://cdn.example.com/profiles/user1/"));
        assert_eq!(uploader.uploads.lock().unwrap().len(), 1);

        let fetched = mgr.get("user1", profile.id).await.unwrap();
        assert_eq!(fetched.photo_url, Some(url));
    }

    #[tokio::test]
    async fn test_upload_failure_still_saves_profile() {
        let (_uploader, mgr) = manager(true);
        let mut profile = GymProfile::new("user1", "Iron Temple");
        profile.name = "Iron Temple II".into();

        let saved = mgr.save_with_photo(&profile, b"jpeg bytes").await.unwrap();

        // The save went through without the new photo.
        assert!(saved.photo_url.is_none());
        let fetched = mgr.get("user1", profile.id).await.unwrap();
        assert_eq!(fetched.name, "Iron Temple II");
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_previous_photo() {
        let (_uploader, mgr) = manager(true);
        let mut profile = GymProfile::new("user1", "Iron Temple");
        profile.photo_url = Some("https://cdn.example.com/old.jpg".into());
        mgr.create(&profile).await.unwrap();

        let saved = mgr.save_with_photo(&profile, b"jpeg bytes").await.unwrap();
        assert_eq!(
            saved.photo_url.as_deref(),
            Some("https://cdn.example.com/old.jpg")
        );
    }
}

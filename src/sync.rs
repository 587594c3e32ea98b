//! Manager wiring and auto-sync.
//!
//! Builds one domain manager per entity family over the shared SQLite pool
//! and the configured remote (or the offline stand-in), and provides the
//! whole-account reconciliation used by the `sync` command and auto-sync.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use fitsync_core::{
    AssetUploader, BodyMeasurementEntry, EntityManager, GymProfile, GymProfileManager, MealLog,
    RemoteStore, Steps, StoreError, SyncedEntity, WeightEntry, WeightGoal, WorkoutSession,
};

use crate::config::{Config, SyncConfig};
use crate::db::SqliteEntityStore;
use crate::remote::{HttpAssetUploader, HttpEntityStore, OfflineRemote};

/// All domain managers, one per entity family.
pub struct Managers {
    pub profiles: GymProfileManager,
    pub weights: EntityManager<WeightEntry>,
    pub measurements: EntityManager<BodyMeasurementEntry>,
    pub goals: EntityManager<WeightGoal>,
    pub meals: EntityManager<MealLog>,
    pub workouts: EntityManager<WorkoutSession>,
    pub steps: EntityManager<Steps>,
}

/// Result of reconciling one collection during a whole-account sync.
pub struct CollectionSync {
    pub collection: &'static str,
    pub result: Result<(usize, usize), StoreError>,
}

fn remote_for<E: SyncedEntity>(sync: &SyncConfig) -> Arc<dyn RemoteStore<E>> {
    match (&sync.server_url, &sync.api_key) {
        (Some(url), Some(key)) => Arc::new(HttpEntityStore::new(url.clone(), key.clone())),
        _ => Arc::new(OfflineRemote),
    }
}

fn uploader_for(sync: &SyncConfig) -> Arc<dyn AssetUploader> {
    match (&sync.server_url, &sync.api_key) {
        (Some(url), Some(key)) => Arc::new(HttpAssetUploader::new(url.clone(), key.clone())),
        _ => Arc::new(OfflineRemote),
    }
}

fn manager_for<E: SyncedEntity>(pool: &SqlitePool, sync: &SyncConfig) -> EntityManager<E> {
    EntityManager::new(
        Arc::new(SqliteEntityStore::new(pool.clone())),
        remote_for(sync),
    )
}

impl Managers {
    pub fn new(pool: &SqlitePool, sync: &SyncConfig) -> Self {
        Self {
            profiles: GymProfileManager::new(
                Arc::new(SqliteEntityStore::<GymProfile>::new(pool.clone())),
                remote_for(sync),
                uploader_for(sync),
            ),
            weights: manager_for(pool, sync),
            measurements: manager_for(pool, sync),
            goals: manager_for(pool, sync),
            meals: manager_for(pool, sync),
            workouts: manager_for(pool, sync),
            steps: manager_for(pool, sync),
        }
    }

    /// Reconciles every collection for `owner_id`. Collections fail
    /// independently; the returned list has one entry per family.
    pub async fn sync_all(&self, owner_id: &str) -> Vec<CollectionSync> {
        fn counts<E>(
            result: Result<fitsync_core::ReconcileOutcome<E>, StoreError>,
        ) -> Result<(usize, usize), StoreError> {
            result.map(|outcome| (outcome.reconciled, outcome.failed()))
        }

        vec![
            CollectionSync {
                collection: GymProfile::COLLECTION,
                result: counts(self.profiles.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: WeightEntry::COLLECTION,
                result: counts(self.weights.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: BodyMeasurementEntry::COLLECTION,
                result: counts(self.measurements.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: WeightGoal::COLLECTION,
                result: counts(self.goals.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: MealLog::COLLECTION,
                result: counts(self.meals.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: WorkoutSession::COLLECTION,
                result: counts(self.workouts.reconcile(owner_id).await),
            },
            CollectionSync {
                collection: Steps::COLLECTION,
                result: counts(self.steps.reconcile(owner_id).await),
            },
        ]
    }
}

/// Performs auto-sync if enabled and configured.
///
/// Any errors are logged and ignored to provide graceful degradation - the
/// CLI keeps working offline when the server is unavailable.
pub async fn try_auto_sync(config: &Config, managers: &Managers) {
    if !config.sync.auto_sync || !config.sync.is_configured() {
        return;
    }

    for sync in managers.sync_all(&config.owner.value).await {
        if let Err(error) = sync.result {
            debug!(collection = sync.collection, %error, "auto-sync skipped collection");
        }
    }
}

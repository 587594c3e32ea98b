//! Two-way reconciliation between a local and a remote collection.
//!
//! For one owner, the reconciler reads the full entity set from both stores
//! (tombstones included), walks the union of ids, and applies the
//! timestamp-wins merge policy per id:
//!
//! - present only remotely: another device created it, local catches up;
//! - present only locally: unsynced offline work, pushed to the server;
//! - present in both: the copy with the later `date_modified` overwrites the
//!   other, tombstone state included. On an exactly equal timestamp the
//!   remote copy is written into local. That tie rule is deliberate and must
//!   not be replaced with id ordering or payload heuristics.
//!
//! Per-id steps are independent: a failed push or upsert is recorded in the
//! outcome and the walk continues. Running the reconciler again with no
//! intervening writes leaves both stores unchanged.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::entity::SyncedEntity;
use crate::error::StoreError;
use crate::store::{LocalStore, RemoteStore};

/// One id that could not be reconciled in a pass.
#[derive(Debug, Clone)]
pub struct ReconcileFailure {
    pub id: Uuid,
    pub error: StoreError,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome<E> {
    /// The merged, live (non-tombstoned) local collection after the pass.
    pub entities: Vec<E>,
    /// Ids brought into agreement.
    pub reconciled: usize,
    /// Ids skipped because a store operation failed; retried next pass.
    pub failures: Vec<ReconcileFailure>,
}

impl<E> ReconcileOutcome<E> {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Reconciler over one entity family's pair of stores.
pub struct Reconciler<E: SyncedEntity> {
    local: Arc<dyn LocalStore<E>>,
    remote: Arc<dyn RemoteStore<E>>,
}

impl<E: SyncedEntity> Reconciler<E> {
    pub fn new(local: Arc<dyn LocalStore<E>>, remote: Arc<dyn RemoteStore<E>>) -> Self {
        Self { local, remote }
    }

    /// Runs one reconciliation pass for `owner_id`.
    ///
    /// Fails outright only when one of the initial collection reads fails;
    /// per-id failures are collected in the outcome instead. After the walk,
    /// the freshly-read local live collection is returned as the
    /// caller-visible merged state.
    pub async fn reconcile(&self, owner_id: &str) -> Result<ReconcileOutcome<E>, StoreError> {
        let remote_rows = self.remote.list(owner_id, true).await?;
        let local_rows = self.local.list(owner_id, true).await?;

        let mut remote_by_id: HashMap<Uuid, E> =
            remote_rows.into_iter().map(|e| (e.id(), e)).collect();
        let mut local_by_id: HashMap<Uuid, E> =
            local_rows.into_iter().map(|e| (e.id(), e)).collect();

        let ids: BTreeSet<Uuid> = remote_by_id.keys().chain(local_by_id.keys()).copied().collect();

        let mut reconciled = 0;
        let mut failures = Vec::new();

        for id in ids {
            let step = self
                .reconcile_id(remote_by_id.remove(&id), local_by_id.remove(&id))
                .await;
            match step {
                Ok(()) => reconciled += 1,
                Err(error) => {
                    warn!(
                        collection = E::COLLECTION,
                        %id,
                        %error,
                        "reconciliation step failed; will retry next pass"
                    );
                    failures.push(ReconcileFailure { id, error });
                }
            }
        }

        debug!(
            collection = E::COLLECTION,
            owner_id,
            reconciled,
            failed = failures.len(),
            "reconciliation pass finished"
        );

        let entities = self.local.list(owner_id, false).await?;
        Ok(ReconcileOutcome {
            entities,
            reconciled,
            failures,
        })
    }

    async fn reconcile_id(&self, remote: Option<E>, local: Option<E>) -> Result<(), StoreError> {
        match (remote, local) {
            // Another device knows about this entity; local catches up.
            (Some(remote), None) => self.upsert_local(&remote).await,
            // Unsynced local work (e.g. created offline) reaches the server.
            (None, Some(local)) => self.push_remote(&local).await,
            (Some(remote), Some(local)) => {
                if local.date_modified() > remote.date_modified() {
                    self.push_remote(&local).await
                } else {
                    // Remote strictly newer, or an exact tie: the remote copy
                    // wins, tombstone state included.
                    self.upsert_local(&remote).await
                }
            }
            // Ids come from the union of both maps.
            (None, None) => Ok(()),
        }
    }

    /// Create if truly new to local, otherwise update.
    async fn upsert_local(&self, entity: &E) -> Result<(), StoreError> {
        match self.local.create(entity).await {
            Err(StoreError::AlreadyExists(_)) => self.local.update(entity).await,
            other => other,
        }
    }

    /// Update acts as an upsert on the remote side; fall back to create when
    /// the server has never seen the id.
    async fn push_remote(&self, entity: &E) -> Result<(), StoreError> {
        match self.remote.update(entity).await {
            Err(StoreError::NotFound(_)) => self.remote.create(entity).await,
            other => other,
        }
    }
}

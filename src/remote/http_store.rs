//! REST client for the sync server's entity collections.
//!
//! Collections live under `/v1/owners/{owner}/{collection}`; entities are
//! exchanged as JSON. HTTP status codes map onto the store error classes so
//! managers and the reconciler can tell a missing entity from an outage.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use fitsync_core::{RemoteStore, StoreError, SyncedEntity};

pub struct HttpEntityStore<E> {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SyncedEntity> HttpEntityStore<E> {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self, owner_id: &str) -> String {
        format!(
            "{}/v1/owners/{}/{}",
            self.base_url.trim_end_matches('/'),
            owner_id,
            E::COLLECTION
        )
    }

    fn entity_url(&self, owner_id: &str, id: Uuid) -> String {
        format!("{}/{}", self.collection_url(owner_id), id)
    }

    async fn check(response: reqwest::Response, detail: &str) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(classify_status(status, detail))
        }
    }
}

/// Maps an HTTP status onto the store error taxonomy.
///
/// Retryable statuses (rate limiting, lock contention, server faults) come
/// back as `Transient` so the next reconciliation pass retries them; anything
/// else unexpected is a permanent `Storage` fault.
fn classify_status(status: StatusCode, detail: &str) -> StoreError {
    match status.as_u16() {
        404 => StoreError::NotFound(detail.to_string()),
        409 => StoreError::AlreadyExists(detail.to_string()),
        408 | 423 | 425 | 429 => StoreError::Transient(format!("{}: HTTP {}", detail, status)),
        500..=599 => StoreError::Transient(format!("{}: HTTP {}", detail, status)),
        _ => StoreError::Storage(format!("{}: unexpected HTTP {}", detail, status)),
    }
}

/// Connection and timeout failures are transient; everything else (bad body,
/// builder misuse) is a storage fault.
fn classify_transport(e: reqwest::Error, detail: &str) -> StoreError {
    if e.is_timeout() || e.is_connect() {
        StoreError::Transient(format!("{}: {}", detail, e))
    } else {
        StoreError::Storage(format!("{}: {}", detail, e))
    }
}

#[async_trait]
impl<E: SyncedEntity> RemoteStore<E> for HttpEntityStore<E> {
    async fn create(&self, entity: &E) -> Result<(), StoreError> {
        let url = self.collection_url(entity.owner_id());
        let detail = format!("{}/{}", E::COLLECTION, entity.id());
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(entity)
            .send()
            .await
            .map_err(|e| classify_transport(e, &detail))?;
        Self::check(response, &detail).await?;
        Ok(())
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<E, StoreError> {
        let detail = format!("{}/{}", E::COLLECTION, id);
        let response = self
            .client
            .get(self.entity_url(owner_id, id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| classify_transport(e, &detail))?;
        Self::check(response, &detail)
            .await?
            .json::<E>()
            .await
            .map_err(|e| StoreError::Storage(format!("{}: bad response body: {}", detail, e)))
    }

    async fn list(&self, owner_id: &str, include_deleted: bool) -> Result<Vec<E>, StoreError> {
        let detail = E::COLLECTION;
        let response = self
            .client
            .get(self.collection_url(owner_id))
            .query(&[("include_deleted", include_deleted)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| classify_transport(e, detail))?;
        Self::check(response, detail)
            .await?
            .json::<Vec<E>>()
            .await
            .map_err(|e| StoreError::Storage(format!("{}: bad response body: {}", detail, e)))
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        let detail = format!("{}/{}", E::COLLECTION, entity.id());
        let response = self
            .client
            .put(self.entity_url(entity.owner_id(), entity.id()))
            .bearer_auth(&self.api_key)
            .json(entity)
            .send()
            .await
            .map_err(|e| classify_transport(e, &detail))?;
        Self::check(response, &detail).await?;
        Ok(())
    }

    async fn delete(&self, entity: &E) -> Result<(), StoreError> {
        let detail = format!("{}/{}", E::COLLECTION, entity.id());
        let response = self
            .client
            .delete(self.entity_url(entity.owner_id(), entity.id()))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| classify_transport(e, &detail))?;
        Self::check(response, &detail).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitsync_core::WeightEntry;

    #[test]
    fn test_status_classification() {
        assert!(classify_status(StatusCode::NOT_FOUND, "x").is_not_found());
        assert!(matches!(
            classify_status(StatusCode::CONFLICT, "x"),
            StoreError::AlreadyExists(_)
        ));
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "x").is_transient());
        assert!(classify_status(StatusCode::INTERNAL_SERVER_ERROR, "x").is_transient());
        assert!(classify_status(StatusCode::SERVICE_UNAVAILABLE, "x").is_transient());
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "x"),
            StoreError::Storage(_)
        ));
    }

    #[test]
    fn test_urls_are_owner_scoped() {
        let store: HttpEntityStore<WeightEntry> =
            HttpEntityStore::new("https://sync.example.com/".into(), "key".into());
        assert_eq!(
            store.collection_url("user1"),
            "https://sync.example.com/v1/owners/user1/weight_entries"
        );

        let id = Uuid::nil();
        assert_eq!(
            store.entity_url("user1", id),
            format!("https://sync.example.com/v1/owners/user1/weight_entries/{}", id)
        );
    }
}

//! Asset upload client.

use async_trait::async_trait;
use serde::Deserialize;

use fitsync_core::{AssetUploader, StoreError};

/// Uploads binary assets to the sync server's blob endpoint.
pub struct HttpAssetUploader {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpAssetUploader {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl AssetUploader for HttpAssetUploader {
    async fn upload(&self, bytes: &[u8], path: &str) -> Result<String, StoreError> {
        let url = format!(
            "{}/v1/assets/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    StoreError::Transient(format!("asset upload: {}", e))
                } else {
                    StoreError::Storage(format!("asset upload: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Transient(format!(
                "asset upload {}: HTTP {}",
                path, status
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Storage(format!("asset upload: bad response body: {}", e)))?;
        Ok(body.url)
    }
}

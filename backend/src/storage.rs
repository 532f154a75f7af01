//! Content-addressed storage client.
//!
//! Uploads local image files to an nft.storage-style API and returns one
//! `ipfs://` locator per file, order-preserving.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;

/// Client for the content-addressed storage API.
pub struct StorageClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

/// Upload response: the store returns the content identifier of the blob.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    value: UploadValue,
}

#[derive(Debug, Deserialize)]
struct UploadValue {
    cid: String,
}

impl StorageClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Upload each file and return its `ipfs://` locator, in input order.
    ///
    /// Fails hard if any path does not exist — a partial collection is
    /// useless to the minting service.
    pub async fn store_nfts(&self, image_paths: &[impl AsRef<Path>]) -> Result<Vec<String>> {
        let mut locators = Vec::with_capacity(image_paths.len());

        for path in image_paths {
            let path = path.as_ref();
            if !path.exists() {
                bail!("file {} doesn't exist", path.display());
            }

            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;

            let cid = self.upload(bytes).await.with_context(|| {
                format!("failed to upload {}", path.display())
            })?;

            info!(path = %path.display(), %cid, "image uploaded");
            locators.push(format!("ipfs://{cid}/metadata.json"));
        }

        Ok(locators)
    }

    async fn upload(&self, bytes: Vec<u8>) -> Result<String> {
        let mut request = self.http.post(format!("{}/upload", self.api_url)).body(bytes);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: UploadResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed storage API response")?;

        Ok(response.value.cid)
    }
}

//! HTTP adapter for the hosted blob store.
//!
//! Writes go through the store's API with option-carrying headers and
//! return a `{url}` receipt; reads go straight to the object's public
//! address. Failures are surfaced, never retried.

use async_trait::async_trait;
use nimbus_core::config::StoreConfig;
use nimbus_core::ports::{BlobStore, PutOptions, StoredObject};
use nimbus_core::{Error, Result};
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use serde::Deserialize;
use tracing::debug;

const CONTENT_TYPE_HEADER: &str = "x-content-type";
const ACCESS_HEADER: &str = "x-access";
const ALLOW_OVERWRITE_HEADER: &str = "x-allow-overwrite";
const ADD_RANDOM_SUFFIX_HEADER: &str = "x-add-random-suffix";
const CACHE_MAX_AGE_HEADER: &str = "x-cache-control-max-age";

#[derive(Debug, Deserialize)]
struct PutReceipt {
    url: String,
}

/// Client for the store's write API and public read address.
pub struct HttpBlobStore {
    endpoint: String,
    token: String,
    public_base_url: String,
    http: reqwest::Client,
}

impl HttpBlobStore {
    pub fn new(cfg: &StoreConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
            public_base_url: cfg.public_base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, key: &str, payload: Vec<u8>, opts: &PutOptions) -> Result<StoredObject> {
        if self.endpoint.is_empty() {
            return Err(Error::Misconfigured("store.endpoint".to_string()));
        }
        if self.token.is_empty() {
            return Err(Error::Misconfigured("store.token".to_string()));
        }

        let url = format!("{}/{}", self.endpoint, key);
        debug!(url = %url, bytes = payload.len(), "uploading blob");

        let response = self
            .http
            .put(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE_HEADER, &opts.content_type)
            .header(ACCESS_HEADER, if opts.public { "public" } else { "private" })
            .header(ALLOW_OVERWRITE_HEADER, if opts.allow_overwrite { "1" } else { "0" })
            .header(ADD_RANDOM_SUFFIX_HEADER, if opts.add_random_suffix { "1" } else { "0" })
            .header(CACHE_MAX_AGE_HEADER, opts.cache_max_age_secs.to_string())
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!("put failed with {status}: {body}")));
        }

        let receipt: PutReceipt = response
            .json()
            .await
            .map_err(|e| Error::Store(format!("bad put receipt: {e}")))?;

        Ok(StoredObject { url: receipt.url })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.public_base_url.is_empty() {
            return Err(Error::Misconfigured("store.public_base_url".to_string()));
        }

        let url = format!("{}/{}", self.public_base_url, key);
        let response = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(Some(body.to_vec()))
    }
}

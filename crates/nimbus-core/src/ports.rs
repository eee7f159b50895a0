//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the refresh pipeline and
//! the external adapters (upstream provider, blob store), so the
//! pipeline is testable without live network or storage.

use crate::Result;
use crate::config::AddressingMode;
use async_trait::async_trait;

/// One fetched upstream payload plus the URL it was resolved from.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub url: String,
    pub data: serde_json::Value,
}

/// Upstream forecast provider.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Issue exactly one fetch for the given addressing mode. No retry.
    async fn fetch(&self, mode: &AddressingMode) -> Result<Forecast>;
}

/// Options for a blob store upsert.
#[derive(Debug, Clone)]
pub struct PutOptions {
    pub content_type: String,
    /// Make the object readable at its public address.
    pub public: bool,
    /// Latest-write-wins; first-write-wins is explicitly rejected.
    pub allow_overwrite: bool,
    /// Suffix-free, stable address.
    pub add_random_suffix: bool,
    /// Edge cache lifetime in seconds.
    pub cache_max_age_secs: u32,
}

impl PutOptions {
    /// Options for the snapshot upsert: public JSON, overwrite allowed,
    /// stable key, short edge cache.
    pub fn snapshot(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            public: true,
            allow_overwrite: true,
            add_random_suffix: false,
            cache_max_age_secs: 60,
        }
    }
}

/// Receipt for a stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Public address of the object.
    pub url: String,
}

/// Durable key-value blob store (atomic last-write-wins upsert).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create-or-overwrite the object at `key`.
    async fn put(&self, key: &str, payload: Vec<u8>, opts: &PutOptions) -> Result<StoredObject>;

    /// Read the object at `key`; `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

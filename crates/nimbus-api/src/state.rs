//! Application state shared across handlers.

use nimbus_core::config::ServiceConfig;
use nimbus_core::ports::{BlobStore, ForecastSource};
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub source: Arc<dyn ForecastSource>,
    pub store: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(
        config: ServiceConfig,
        source: Arc<dyn ForecastSource>,
        store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            config,
            source,
            store,
        }
    }
}

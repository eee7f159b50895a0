//! Cached snapshot envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed store key of the single live snapshot.
pub const SNAPSHOT_KEY: &str = "cache/latest.json";

/// Provenance tag for the upstream feed.
pub const SNAPSHOT_SOURCE: &str = "meteonomiqs_v4";

/// Content type of the stored snapshot.
pub const SNAPSHOT_CONTENT_TYPE: &str = "application/json";

/// Envelope wrapping one upstream payload with provenance.
///
/// There is exactly one live snapshot at a time; a successful refresh
/// unconditionally replaces it. The `data` field carries the upstream
/// JSON verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub source: String,
    pub url: String,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl SnapshotEnvelope {
    pub fn new(url: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            source: SNAPSHOT_SOURCE.to_string(),
            url: url.into(),
            fetched_at: Utc::now(),
            data,
        }
    }

    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

//! Refresh pipeline.
//!
//! Orchestrates gate evaluation, configuration validation, the single
//! upstream fetch, envelope construction, and the idempotent store
//! upsert. Every outcome is terminal for the request; nothing retries.

use crate::config::{AddressingMode, ServiceConfig};
use crate::gate::{self, GateDecision, TriggerContext};
use crate::ports::{BlobStore, ForecastSource, PutOptions};
use crate::snapshot::{SNAPSHOT_CONTENT_TYPE, SNAPSHOT_KEY, SnapshotEnvelope};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Terminal outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Authorized but outside the scheduled window; benign no-op.
    Skipped { reason: String },
    /// Snapshot written: serialized byte count and public address.
    Stored { bytes: usize, url: String },
}

/// Run the refresh pipeline once.
///
/// `now` is the trigger instant, injected so the gate window is
/// deterministic under test. A failed upstream fetch never reaches the
/// store, so the store never observes a partial envelope.
pub async fn run_refresh(
    config: &ServiceConfig,
    trigger: &TriggerContext,
    now: DateTime<Utc>,
    source: &dyn ForecastSource,
    store: &dyn BlobStore,
) -> Result<RefreshOutcome> {
    match gate::evaluate(&config.schedule, trigger, now)? {
        GateDecision::RejectUnauthorized => return Err(Error::Unauthorized),
        GateDecision::SkipNotScheduled => {
            let reason = format!(
                "not {:02}:{:02} {}",
                config.schedule.hour, config.schedule.minute, config.schedule.timezone
            );
            info!(reason, "refresh skipped");
            return Ok(RefreshOutcome::Skipped { reason });
        }
        GateDecision::Proceed => {}
    }

    if config.upstream.api_key.is_empty() {
        return Err(Error::Misconfigured("upstream.api_key".to_string()));
    }
    let mode = AddressingMode::resolve(&config.upstream)?;

    let forecast = source.fetch(&mode).await.inspect_err(|e| {
        error!(error = %e, "upstream fetch failed");
    })?;

    let envelope = SnapshotEnvelope::new(forecast.url, forecast.data);
    let payload = envelope.to_bytes()?;
    let bytes = payload.len();

    let stored = store
        .put(SNAPSHOT_KEY, payload, &PutOptions::snapshot(SNAPSHOT_CONTENT_TYPE))
        .await
        .inspect_err(|e| {
            error!(error = %e, "snapshot write failed");
        })?;

    info!(bytes, url = %stored.url, "snapshot refreshed");
    Ok(RefreshOutcome::Stored {
        bytes,
        url: stored.url,
    })
}

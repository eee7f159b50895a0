//! Refresh trigger handler.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;
use nimbus_core::gate::TriggerContext;
use nimbus_core::refresh::{RefreshOutcome, run_refresh};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::handlers::error_response;
use crate::state::AppState;

const CRON_SECRET_HEADER: &str = "x-cron-secret";

#[derive(Deserialize)]
pub struct RefreshParams {
    /// `force=1` bypasses the time window (not authorization).
    pub force: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RefreshResponse {
    Skipped {
        ok: bool,
        skipped: bool,
        reason: String,
    },
    Stored {
        ok: bool,
        bytes: usize,
        url: String,
    },
}

pub async fn trigger_refresh(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefreshParams>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, (StatusCode, String)> {
    let trigger = TriggerContext {
        user_agent: header_string(&headers, header::USER_AGENT.as_str()),
        provided_secret: headers
            .get(CRON_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        force: params.force.as_deref() == Some("1"),
    };

    let outcome = run_refresh(
        &state.config,
        &trigger,
        Utc::now(),
        state.source.as_ref(),
        state.store.as_ref(),
    )
    .await
    .map_err(error_response)?;

    let response = match outcome {
        RefreshOutcome::Skipped { reason } => RefreshResponse::Skipped {
            ok: true,
            skipped: true,
            reason,
        },
        RefreshOutcome::Stored { bytes, url } => RefreshResponse::Stored {
            ok: true,
            bytes,
            url,
        },
    };
    Ok(Json(response))
}

fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

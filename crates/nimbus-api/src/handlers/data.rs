//! Read gate and read proxy.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use nimbus_core::Error;
use nimbus_core::snapshot::SNAPSHOT_KEY;
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;

/// Content type forced onto every served snapshot.
const SERVED_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub async fn read_snapshot(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if !is_authorized(&state, &headers) {
        return unauthorized();
    }

    match state.store.get(SNAPSHOT_KEY).await {
        Ok(Some(body)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, SERVED_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Ok(None) => cache_empty(),
        Err(Error::Misconfigured(what)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Missing configuration: {what}"),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "snapshot read failed");
            cache_empty()
        }
    }
}

/// Token must be configured non-empty and match the bearer value exactly.
fn is_authorized(state: &AppState, headers: &HeaderMap) -> bool {
    let token = &state.config.read.token;
    if token.is_empty() {
        return false;
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == token)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        "Unauthorized",
    )
        .into_response()
}

fn cache_empty() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "Cache empty").into_response()
}

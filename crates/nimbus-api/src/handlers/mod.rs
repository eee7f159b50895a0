//! HTTP request handlers.

pub mod data;
pub mod health;
pub mod refresh;

use axum::http::StatusCode;
use nimbus_core::Error;

/// Map a pipeline error to its terminal HTTP response.
pub(crate) fn error_response(err: Error) -> (StatusCode, String) {
    let status = match &err {
        Error::Unauthorized => StatusCode::FORBIDDEN,
        Error::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
        Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::CacheEmpty => StatusCode::SERVICE_UNAVAILABLE,
        Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

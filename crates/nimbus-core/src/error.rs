//! Error types for Nimbus.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Access errors
    #[error("Unauthorized")]
    Unauthorized,

    // Configuration errors
    #[error("Missing configuration: {0}")]
    Misconfigured(String),

    // Upstream provider errors
    #[error("Upstream error {status}: {snippet}")]
    Upstream { status: String, snippet: String },

    // Blob store errors
    #[error("Store error: {0}")]
    Store(String),

    #[error("Cache empty")]
    CacheEmpty,

    // Generic
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Upstream failure with the diagnostic snippet capped at 300 chars.
    pub fn upstream(status: impl Into<String>, body: &str) -> Self {
        Error::Upstream {
            status: status.into(),
            snippet: body.chars().take(300).collect(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

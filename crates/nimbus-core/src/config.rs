//! Service configuration.
//!
//! All values are externally supplied through `NIMBUS`-prefixed
//! environment variables (e.g. `NIMBUS__SCHEDULE__HOUR`,
//! `NIMBUS__UPSTREAM__API_KEY`) and loaded once at startup into an
//! explicit struct passed to each component. Presence of operationally
//! required values (API key, addressing fields) is validated per request
//! by the refresh pipeline, not at load time, so a partially configured
//! deployment still serves reads.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub schedule: ScheduleConfig,
    pub upstream: UpstreamConfig,
    pub store: StoreConfig,
    pub read: ReadConfig,
}

/// Refresh trigger gating: who may trigger, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Target hour in the scheduling time zone.
    pub hour: u32,
    /// Target minute in the scheduling time zone.
    pub minute: u32,
    /// IANA name of the scheduling time zone.
    pub timezone: String,
    /// User-Agent substring identifying the platform scheduler.
    pub scheduler_user_agent: String,
    /// Shared secret for manual triggers; empty disables secret auth.
    pub secret: String,
}

fn default_minute() -> u32 {
    5
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

fn default_scheduler_user_agent() -> String {
    "vercel-cron/1.0".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: default_minute(),
            timezone: default_timezone(),
            scheduler_user_agent: default_scheduler_user_agent(),
            secret: String::new(),
        }
    }
}

/// Upstream forecast provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Provider API key.
    pub api_key: String,
    /// Locale sent as `Accept-Language`.
    pub lang: String,
    /// Coordinates mode: latitude.
    pub lat: Option<String>,
    /// Coordinates mode: longitude.
    pub lon: Option<String>,
    /// Postal location mode: ISO country code, e.g. "DE".
    pub country_code: Option<String>,
    /// Postal location mode: postcode, e.g. "10115".
    pub postcode: Option<String>,
}

fn default_base_url() -> String {
    "https://forecast.meteonomiqs.com".to_string()
}

fn default_lang() -> String {
    "de-de".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            lang: default_lang(),
            lat: None,
            lon: None,
            country_code: None,
            postcode: None,
        }
    }
}

/// Blob store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Write API endpoint of the store.
    pub endpoint: String,
    /// Write token for the store API.
    pub token: String,
    /// Public base address where stored objects are readable.
    pub public_base_url: String,
}

/// Read endpoint authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Bearer token required by the read endpoint; empty locks reads out.
    pub token: String,
}

impl ServiceConfig {
    /// Load configuration from `NIMBUS`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let source = ::config::Environment::with_prefix("NIMBUS")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        Self::from_source(source)
    }

    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        ::config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| Error::Misconfigured(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::Misconfigured(e.to_string()))
    }
}

/// How the upstream forecast is addressed. Exactly one mode is active
/// per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    Coordinates { lat: String, lon: String },
    PostalLocation { country: String, postcode: String },
}

impl AddressingMode {
    /// Resolve the active mode from configuration.
    ///
    /// A fully specified postal location takes precedence over
    /// coordinates. If neither mode is complete, fails naming the
    /// missing fields before any network call is made.
    pub fn resolve(cfg: &UpstreamConfig) -> Result<Self> {
        fn set(v: &Option<String>) -> Option<String> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        if let (Some(country), Some(postcode)) = (set(&cfg.country_code), set(&cfg.postcode)) {
            return Ok(AddressingMode::PostalLocation { country, postcode });
        }
        if let (Some(lat), Some(lon)) = (set(&cfg.lat), set(&cfg.lon)) {
            return Ok(AddressingMode::Coordinates { lat, lon });
        }
        Err(Error::Misconfigured(
            "upstream.lat/upstream.lon (or upstream.country_code + upstream.postcode)".to_string(),
        ))
    }
}

//! Meteonomiqs v4 forecast client.

use async_trait::async_trait;
use nimbus_core::config::{AddressingMode, UpstreamConfig};
use nimbus_core::ports::{Forecast, ForecastSource};
use nimbus_core::{Error, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use tracing::debug;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the upstream forecast provider.
#[derive(Debug)]
pub struct ForecastClient {
    base_url: Url,
    api_key: String,
    lang: String,
    http: reqwest::Client,
}

impl ForecastClient {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| Error::Misconfigured(format!("upstream.base_url: {e}")))?;
        Ok(Self {
            base_url,
            api_key: cfg.api_key.clone(),
            lang: cfg.lang.clone(),
            http: reqwest::Client::new(),
        })
    }

    /// Build the mode-exclusive forecast URL. Path segments are
    /// percent-encoded; the provider requires the trailing slash.
    pub fn forecast_url(&self, mode: &AddressingMode) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Misconfigured("upstream.base_url is not a base".to_string()))?;
            segments.extend(["v4_0", "forecast"]);
            match mode {
                AddressingMode::Coordinates { lat, lon } => {
                    segments.extend([lat.as_str(), lon.as_str()]);
                }
                AddressingMode::PostalLocation { country, postcode } => {
                    segments.extend(["byLocation", country.as_str(), postcode.as_str()]);
                }
            }
            segments.push("");
        }
        Ok(url)
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, mode: &AddressingMode) -> Result<Forecast> {
        let url = self.forecast_url(mode)?;
        debug!(url = %url, "fetching forecast");

        let response = self
            .http
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, &self.lang)
            .send()
            .await
            .map_err(|e| Error::upstream("network", &e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Error::upstream(status.as_u16().to_string(), &body));
        }

        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| Error::upstream("invalid-json", &body))?;

        Ok(Forecast {
            url: url.to_string(),
            data,
        })
    }
}

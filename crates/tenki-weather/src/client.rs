//! JMA bosai API client.
//!
//! Transport failures and non-2xx responses are logged and reported as
//! `Ok(None)` so callers can show a "no data" screen. A body that is not the
//! JSON we expect is an error.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tenki_core::{HttpConfig, JmaConfig, ReqwestErrorExt};
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{AreaDirectory, ForecastDocument};

#[derive(Debug, Clone)]
pub struct JmaClient {
    client: Client,
    config: JmaConfig,
}

impl JmaClient {
    pub fn new(config: &JmaConfig, http: &HttpConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &JmaConfig {
        &self.config
    }

    /// Fetch the area directory (`centers` and `offices`).
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_area_directory(&self) -> Result<Option<AreaDirectory>, WeatherError> {
        self.get_json(&self.config.area_url, "area directory").await
    }

    /// Fetch the forecast document for one office code.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        area_code: &str,
    ) -> Result<Option<ForecastDocument>, WeatherError> {
        let url = self.config.forecast_url(area_code);
        self.get_json(&url, "forecast").await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Option<T>, WeatherError> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Failed to fetch {} from {}: {}", what, url, e.into_network_error());
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Fetching {} from {} returned status {}", what, url, status);
            return Ok(None);
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Failed to read {} body: {}", what, e.into_network_error());
                return Ok(None);
            }
        };

        let decoded = serde_json::from_slice(&body)
            .map_err(|e| WeatherError::Parse(format!("{}: {}", what, e)))?;

        tracing::debug!("Fetched {} ({} bytes)", what, body.len());
        Ok(Some(decoded))
    }
}

// crates/skycast-weather/src/client.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use skycast_core::error::{ReqwestErrorExt, WeatherError};

use crate::types::{CurrentConditions, ForecastResponse, QueryMode};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Weather API client.
///
/// Issues the current-conditions and forecast requests for a query mode
/// concurrently; both must succeed. One attempt per call, no retries,
/// no caching.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    client: Arc<Client>,
    api_key: String,
}

impl WeatherClient {
    /// Create a new client against the given API base URL.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        // A trailing slash keeps Url::join from replacing the last path
        // segment of bases like ".../data/2.5".
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&base).context("Invalid weather API base URL")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions and the 5-day forecast for a query mode.
    ///
    /// The two requests run concurrently; failure of either fails the
    /// whole call.
    pub async fn fetch(
        &self,
        mode: &QueryMode,
    ) -> Result<(CurrentConditions, ForecastResponse), WeatherError> {
        tracing::debug!(?mode, "fetching current conditions and forecast");

        let (current, forecast) = tokio::try_join!(
            self.get_json::<CurrentConditions>("weather", mode),
            self.get_json::<ForecastResponse>("forecast", mode),
        )?;

        tracing::info!(
            city = %current.name,
            samples = forecast.list.len(),
            "weather fetch complete"
        );
        Ok((current, forecast))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mode: &QueryMode,
    ) -> Result<T, WeatherError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        let mut request = self
            .client
            .get(url)
            .query(&[("appid", self.api_key.as_str())]);
        request = match mode {
            QueryMode::City(name) => request.query(&[("q", name.as_str())]),
            QueryMode::Coords { lat, lon } => {
                request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            }
        };

        let response = request
            .send()
            .await
            .map_err(ReqwestErrorExt::into_weather_error)?;

        let status = response.status();
        if !status.is_success() {
            let fallback = format!("API error ({})", status.as_u16());
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_owned)
                })
                .unwrap_or(fallback);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(ReqwestErrorExt::into_weather_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WeatherClient::new("https://api.openweathermap.org/data/2.5", "test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let client = WeatherClient::new("not a url", "test-key");
        assert!(client.is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = WeatherClient::new("https://example.com/data/2.5", "k").unwrap();
        let joined = client.base_url.join("weather").unwrap();
        assert_eq!(joined.path(), "/data/2.5/weather");
    }
}

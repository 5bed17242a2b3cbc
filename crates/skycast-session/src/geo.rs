//! Geolocation capability.
//!
//! The dashboard only needs a coordinate pair, asynchronously, with the
//! possibility of denial. What produces it is the embedder's choice;
//! `IpLocator` is the shipped implementation, resolving the machine's
//! public IP to an approximate position.

use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

use skycast_core::GeoError;

const IP_API_URL: &str = "http://ip-api.com/json/?fields=status,lat,lon";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Async positioning capability. Implementations resolve with the best
/// accuracy they have, bounded to roughly ten seconds.
pub trait Geolocator {
    /// Whether the capability exists at all on this system. When false,
    /// `locate` is never called.
    fn available(&self) -> bool;

    fn locate(&self) -> impl std::future::Future<Output = Result<Coordinates, GeoError>> + Send;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// IP-based locator.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpLocator {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_endpoint(IP_API_URL)
    }

    /// Point the locator at a different endpoint (used by tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create geolocation client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Geolocator for IpLocator {
    fn available(&self) -> bool {
        true
    }

    async fn locate(&self) -> Result<Coordinates, GeoError> {
        tracing::debug!("resolving position via IP lookup");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| GeoError::Denied(e.to_string()))?;

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Denied(e.to_string()))?;

        if body.status != "success" {
            return Err(GeoError::Denied(
                "positioning service refused the request".to_string(),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::info!(latitude, longitude, "position resolved");
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(GeoError::Denied(
                "positioning service returned no coordinates".to_string(),
            )),
        }
    }
}

//! Provides a client for the GIOS (Polish Chief Inspectorate of Environmental Protection) REST API.
//!
//! This module defines the `GiosClient` struct and its method for fetching the
//! current air quality index of a monitoring station.

use crate::decode::decode_air_quality;
use crate::error::{AppError, Result};
use crate::models::AirQuality;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

/// Default base URL of the public GIOS API.
pub const API_BASE_URL: &str = "http://api.gios.gov.pl/pjp-api/rest";

/// An asynchronous client for fetching station air quality indexes.
///
/// Holds no per-call state; concurrent calls on the same client are independent.
#[derive(Debug, Clone)]
pub struct GiosClient {
    client: Client,
    base_url: String,
}

impl Default for GiosClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GiosClient {
    /// Creates a new `GiosClient` pointing at the public GIOS API.
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Creates a new `GiosClient` with a custom base URL (a mirror, or a mock server in tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and decodes the current air quality index of a station.
    ///
    /// Corresponds to the `/aqindex/getIndex/{stationId}` endpoint. Pollutant
    /// indexes that fail to decode are left out of the result; a missing station
    /// id or general index fails the whole call with `AppError::Decode`.
    pub async fn get_air_quality(&self, station_id: i64) -> Result<AirQuality> {
        info!("Fetching air quality index for station {}", station_id);

        let url = format!("{}/aqindex/getIndex/{}", self.base_url, station_id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Error fetching air quality for station {}: {}", station_id, e);
            AppError::Api(e.into())
        })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let status = e.status().unwrap_or_default();
                error!("API request to {} failed with status {}: {}", url, status, e);
                if status == reqwest::StatusCode::NOT_FOUND {
                    error!("Received 404 Not Found. Check that station {} exists.", station_id);
                }
                return Err(AppError::Api(e.into()));
            },
        };

        let body: Value = response.json().await.map_err(|e| {
            error!("Error parsing API response JSON: {}", e);
            AppError::Api(e.into())
        })?;

        let air_quality = decode_air_quality(&body).map_err(|e| {
            error!("Invalid air quality response for station {}: {}", station_id, e);
            AppError::Decode(e)
        })?;

        debug!(
            "Received {} pollutant indexes for station {}",
            air_quality.indexes.len(),
            station_id
        );

        Ok(air_quality)
    }
}

/// Fetches a station's air quality index using a default `GiosClient`.
pub async fn get_air_quality(station_id: i64) -> Result<AirQuality> {
    GiosClient::new().get_air_quality(station_id).await
}

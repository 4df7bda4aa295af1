use crate::{Result, config::GeocoderConfig};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::debug;

/// A successfully reverse-geocoded place.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub address: String,
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve coordinates to a place. `Ok(None)` means the provider had
    /// no answer for the coordinates; `Err` means the lookup itself failed.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodedPlace>>;
}

/// Nominatim reverse-geocoding client.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodedPlace>> {
        let url = format!("{}/reverse", self.base_url);

        debug!("Reverse geocoding {}, {}", latitude, longitude);

        let payload: serde_json::Value = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Nominatim reports "nothing there" as a 200 with an error body
        if payload.get("error").is_some() {
            return Ok(None);
        }

        let Some(address) = payload.get("display_name").and_then(|d| d.as_str()) else {
            return Ok(None);
        };

        Ok(Some(GeocodedPlace {
            address: address.to_string(),
            raw: payload,
        }))
    }
}

use serde::Serialize;

/// Context for a coordinate pair. `raw` carries the provider payload when
/// the lookup succeeded; the address falls back to a fixed phrase otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct LocationContext {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub raw: Option<serde_json::Value>,
}

impl LocationContext {
    pub fn resolved(
        latitude: f64,
        longitude: f64,
        address: String,
        raw: serde_json::Value,
    ) -> Self {
        Self {
            latitude,
            longitude,
            address,
            raw: Some(raw),
        }
    }

    pub fn unknown(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: "Unknown location".to_string(),
            raw: None,
        }
    }

    pub fn failed(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: "Error getting location information".to_string(),
            raw: None,
        }
    }
}

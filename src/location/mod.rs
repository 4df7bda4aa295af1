mod client;
mod types;

pub use client::{GeocodedPlace, NominatimClient, ReverseGeocoder};
pub use types::LocationContext;

use tracing::error;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Location context lookups with fixed fallback wording. Provider errors
/// never escape this service.
pub struct LocationService {
    geocoder: Box<dyn ReverseGeocoder>,
}

impl LocationService {
    pub fn new(geocoder: Box<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn context(&self, latitude: f64, longitude: f64) -> LocationContext {
        match self.geocoder.reverse(latitude, longitude).await {
            Ok(Some(place)) => {
                LocationContext::resolved(latitude, longitude, place.address, place.raw)
            }
            Ok(None) => LocationContext::unknown(latitude, longitude),
            Err(e) => {
                error!("Error getting location context: {}", e);
                LocationContext::failed(latitude, longitude)
            }
        }
    }
}

/// Great-circle (haversine) distance between two (latitude, longitude)
/// pairs, in meters.
pub fn distance_between(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Cardinal direction from `from` to `to`: the initial bearing snapped to
/// eight 45° sectors.
pub fn compass_direction(from: (f64, f64), to: (f64, f64)) -> &'static str {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let d_lon = lon2 - lon1;
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);

    let index = ((bearing / 45.0).round() as usize) % 8;
    DIRECTIONS[index]
}

/// Spoken summary of a location context.
pub fn describe_location(context: &LocationContext) -> String {
    format!("You are currently at {}", context.address)
}

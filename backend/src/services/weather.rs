//! Weather service: geocoding and live snapshots that never fail

use shared::{GeoLocation, GpsCoordinates, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::external::OpenMeteoClient;

/// Weather service wrapping the Open-Meteo client
#[derive(Clone)]
pub struct WeatherService {
    client: OpenMeteoClient,
}

impl WeatherService {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: OpenMeteoClient::new(config),
        }
    }

    pub fn with_client(client: OpenMeteoClient) -> Self {
        Self { client }
    }

    /// Geocode a city; `None` on any failure
    pub async fn geocode(&self, city: &str) -> Option<GeoLocation> {
        match self.client.geocode(city).await {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::warn!(city, error = %e, "Geocoding failed");
                None
            }
        }
    }

    /// Live temperature, rainfall and AQI; the fallback snapshot if either
    /// remote call fails
    pub async fn snapshot(&self, coordinates: GpsCoordinates) -> WeatherSnapshot {
        let (conditions, aqi) = tokio::join!(
            self.client.current_conditions(coordinates),
            self.client.current_aqi(coordinates),
        );

        let (snapshot, error) = WeatherSnapshot::from_results(conditions, aqi);
        if let Some(e) = error {
            tracing::warn!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                error = %e,
                "Weather fetch failed; using fallback snapshot"
            );
        }
        snapshot
    }
}

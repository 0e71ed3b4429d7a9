//! Open-Meteo client: geocoding, current weather and air quality

use reqwest::Client;
use serde::Deserialize;
use shared::{CurrentConditions, GeoLocation, GpsCoordinates};

use super::{check_status, FetchError};
use crate::config::WeatherConfig;

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    air_quality_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: String,
}

/// Keys missing from `current` read as zero
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastCurrent {
    #[serde(default)]
    temperature_2m: Option<f64>,
    #[serde(default)]
    rain: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: AirQualityCurrent,
}

#[derive(Debug, Default, Deserialize)]
struct AirQualityCurrent {
    #[serde(default)]
    us_aqi: Option<f64>,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_base_urls(
            config.geocoding_url.clone(),
            config.forecast_url.clone(),
            config.air_quality_url.clone(),
        )
    }

    /// Create a client against custom endpoints (for testing)
    pub fn with_base_urls(
        geocoding_url: String,
        forecast_url: String,
        air_quality_url: String,
    ) -> Self {
        Self {
            client: Client::new(),
            geocoding_url,
            forecast_url,
            air_quality_url,
        }
    }

    /// Resolve a city name to coordinates and the geocoder's canonical name
    pub async fn geocode(&self, city: &str) -> Result<GeoLocation, FetchError> {
        let response = self
            .client
            .get(format!("{}/search", self.geocoding_url))
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        parse_geocoding(&body)
    }

    /// Current temperature and rainfall at a point
    pub async fn current_conditions(
        &self,
        coordinates: GpsCoordinates,
    ) -> Result<CurrentConditions, FetchError> {
        let response = self
            .client
            .get(format!("{}/forecast", self.forecast_url))
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", "temperature_2m,rain".to_string()),
                ("hourly", "temperature_2m,rain".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        parse_forecast(&body)
    }

    /// Current US AQI at a point
    pub async fn current_aqi(&self, coordinates: GpsCoordinates) -> Result<i32, FetchError> {
        let response = self
            .client
            .get(format!("{}/air-quality", self.air_quality_url))
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current", "us_aqi".to_string()),
            ])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        parse_air_quality(&body)
    }
}

fn parse_geocoding(body: &str) -> Result<GeoLocation, FetchError> {
    let data: GeocodingResponse = serde_json::from_str(body)?;
    let first = data
        .results
        .into_iter()
        .next()
        .ok_or(FetchError::Empty("geocoding results"))?;

    Ok(GeoLocation {
        coordinates: GpsCoordinates::new(first.latitude, first.longitude),
        name: first.name,
    })
}

fn parse_forecast(body: &str) -> Result<CurrentConditions, FetchError> {
    let data: ForecastResponse = serde_json::from_str(body)?;
    Ok(CurrentConditions {
        temperature_celsius: data.current.temperature_2m.unwrap_or(0.0),
        rainfall_mm: data.current.rain.unwrap_or(0.0),
    })
}

fn parse_air_quality(body: &str) -> Result<i32, FetchError> {
    let data: AirQualityResponse = serde_json::from_str(body)?;
    Ok(data.current.us_aqi.map(|aqi| aqi.round() as i32).unwrap_or(0))
}

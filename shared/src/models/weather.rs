//! Weather data models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Temperature reported when live weather cannot be fetched
pub const FALLBACK_TEMPERATURE_CELSIUS: f64 = 25.0;
/// Rainfall reported when live weather cannot be fetched
pub const FALLBACK_RAINFALL_MM: f64 = 0.0;
/// AQI reported when live weather cannot be fetched
pub const FALLBACK_AQI: i32 = 100;

/// A transient weather reading for one location, computed per request.
///
/// `success` is false when any remote call failed and the fallback constants
/// were substituted; callers still render the values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub rainfall_mm: f64,
    pub aqi: i32,
    pub success: bool,
}

impl WeatherSnapshot {
    /// A live reading
    pub fn live(temperature_celsius: f64, rainfall_mm: f64, aqi: i32) -> Self {
        Self {
            temperature_celsius,
            rainfall_mm,
            aqi,
            success: true,
        }
    }

    /// The fixed fallback reading (25°C, 0mm, AQI 100)
    pub fn fallback() -> Self {
        Self {
            temperature_celsius: FALLBACK_TEMPERATURE_CELSIUS,
            rainfall_mm: FALLBACK_RAINFALL_MM,
            aqi: FALLBACK_AQI,
            success: false,
        }
    }

    /// Combine the two independent remote results. Either failure yields the
    /// fallback snapshot; the error is handed back so it can be logged.
    pub fn from_results<E>(
        conditions: Result<CurrentConditions, E>,
        aqi: Result<i32, E>,
    ) -> (Self, Option<E>) {
        match (conditions, aqi) {
            (Ok(c), Ok(aqi)) => (Self::live(c.temperature_celsius, c.rainfall_mm, aqi), None),
            (Err(e), _) | (_, Err(e)) => (Self::fallback(), Some(e)),
        }
    }

    pub fn is_raining(&self) -> bool {
        self.rainfall_mm > 0.0
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Current temperature and rainfall from the forecast service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub rainfall_mm: f64,
}

/// A geocoded place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub coordinates: GpsCoordinates,
    /// Canonical place name returned by the geocoder
    pub name: String,
}

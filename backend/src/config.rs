//! Configuration management for the AgriAir platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{GpsCoordinates, LocationContext};

/// Marker left in sample configs in place of a real Gemini key
const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Open-Meteo endpoints
    pub weather: WeatherConfig,

    /// Encyclopedia summary endpoint
    pub encyclopedia: EncyclopediaConfig,

    /// Generative AI crop knowledge
    pub ai: AiConfig,

    /// Location used when a user has none stored
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub air_quality_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EncyclopediaConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Gemini API key; absent means the AI stage is skipped
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl AiConfig {
    /// The usable API key, if one is configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.contains(PLACEHOLDER_API_KEY))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub default_city: String,
    pub default_latitude: f64,
    pub default_longitude: f64,
}

impl LocationConfig {
    pub fn default_context(&self) -> LocationContext {
        LocationContext {
            coordinates: GpsCoordinates::new(self.default_latitude, self.default_longitude),
            city: self.default_city.clone(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.access_token_expiry", 86400)?
            .set_default("weather.geocoding_url", "https://geocoding-api.open-meteo.com/v1")?
            .set_default("weather.forecast_url", "https://api.open-meteo.com/v1")?
            .set_default(
                "weather.air_quality_url",
                "https://air-quality-api.open-meteo.com/v1",
            )?
            .set_default("encyclopedia.base_url", "https://en.wikipedia.org/api/rest_v1")?
            .set_default("encyclopedia.user_agent", "AgriAir/1.0")?
            .set_default("encyclopedia.timeout_secs", 3)?
            .set_default("ai.model", "gemini-1.5-flash")?
            .set_default(
                "ai.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("ai.timeout_secs", 30)?
            .set_default("location.default_city", shared::DEFAULT_CITY)?
            .set_default("location.default_latitude", shared::DEFAULT_LATITUDE)?
            .set_default("location.default_longitude", shared::DEFAULT_LONGITUDE)?
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("AGRI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai(key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: key.map(str::to_string),
            model: "gemini-1.5-flash".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        assert_eq!(ai(None).api_key(), None);
        assert_eq!(ai(Some("")).api_key(), None);
        assert_eq!(ai(Some("YOUR_GEMINI_API_KEY")).api_key(), None);
        assert_eq!(ai(Some("abc123")).api_key(), Some("abc123"));
    }

    #[test]
    fn test_default_context_from_location() {
        let location = LocationConfig {
            default_city: "Ludhiana".to_string(),
            default_latitude: 30.9010,
            default_longitude: 75.8573,
        };
        assert_eq!(location.default_context(), LocationContext::default());
    }
}

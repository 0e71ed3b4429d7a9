//! Dashboard composition: location, live weather, advisories and tracked crops

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{AdvisoryService, CropService, LocationService, WeatherService};
use shared::{
    compose_display_advisories, generate_live_advisories, smart_suggestions, validate_coordinates,
    Advisory, Crop, GeoLocation, GpsCoordinates, LocationContext, WeatherSnapshot,
    RECENT_PERSISTED_LIMIT,
};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
    weather: WeatherService,
    default_location: LocationContext,
}

/// Where the request runs, and how to show it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub context: LocationContext,
    pub display_city: String,
}

/// Everything the dashboard shows
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub temperature: f64,
    pub rainfall: f64,
    pub aqi: i32,
    pub api_status: bool,
    pub current_city: String,
    pub today: NaiveDate,
    pub advisories: Vec<Advisory>,
    pub tracked_crops: Vec<Crop>,
}

/// A crop with guidance for the user's location
#[derive(Debug, Serialize)]
pub struct CropDetail {
    pub crop: Crop,
    pub city: String,
    pub weather: WeatherSnapshot,
    pub suggestions: Vec<String>,
}

impl DashboardService {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            weather: WeatherService::new(&config.weather),
            default_location: config.location.default_context(),
        }
    }

    /// Pick the location for this request.
    ///
    /// A searched city that geocodes replaces the stored context; one that
    /// does not falls back to the default location for this request only.
    pub async fn resolve_location(
        &self,
        user_id: Uuid,
        searched_city: Option<&str>,
    ) -> AppResult<ResolvedLocation> {
        let locations = LocationService::new(self.db.clone());

        match searched_city.map(str::trim).filter(|c| !c.is_empty()) {
            Some(city) => match self.weather.geocode(city).await.and_then(located_context) {
                Some(context) => {
                    locations.save(user_id, &context).await?;
                    Ok(ResolvedLocation {
                        display_city: context.city.clone(),
                        context,
                    })
                }
                None => Ok(not_found_location(city, self.default_location.clone())),
            },
            None => {
                let context = locations
                    .load_or(user_id, self.default_location.clone())
                    .await?;
                Ok(ResolvedLocation {
                    display_city: context.city.clone(),
                    context,
                })
            }
        }
    }

    pub async fn dashboard(&self, user_id: Uuid, searched_city: Option<&str>) -> AppResult<Dashboard> {
        let location = self.resolve_location(user_id, searched_city).await?;
        let weather = self.weather.snapshot(location.context.coordinates).await;

        let now = Utc::now();
        let live = generate_live_advisories(&weather, now);
        let persisted = AdvisoryService::new(self.db.clone())
            .list(Some(RECENT_PERSISTED_LIMIT as i64))
            .await?;
        let tracked_crops = CropService::new(self.db.clone())
            .list_tracked(user_id)
            .await?;

        Ok(Dashboard {
            temperature: weather.temperature_celsius,
            rainfall: weather.rainfall_mm,
            aqi: weather.aqi,
            api_status: weather.success,
            current_city: location.display_city,
            today: now.date_naive(),
            advisories: compose_display_advisories(live, persisted),
            tracked_crops,
        })
    }

    /// Crop plus suggestions against the user's stored location
    pub async fn crop_detail(&self, user_id: Uuid, crop_id: Uuid) -> AppResult<CropDetail> {
        let crop = CropService::new(self.db.clone()).get(user_id, crop_id).await?;
        let location = self.resolve_location(user_id, None).await?;
        let weather = self.weather.snapshot(location.context.coordinates).await;
        let suggestions = smart_suggestions(&crop.profile, &weather, &location.display_city);

        Ok(CropDetail {
            crop,
            city: location.display_city,
            weather,
            suggestions,
        })
    }

    /// Weather at the default location, used by the CSV export
    pub async fn default_snapshot(&self) -> WeatherSnapshot {
        self.weather
            .snapshot(self.default_location.coordinates)
            .await
    }
}

fn not_found_location(city: &str, default: LocationContext) -> ResolvedLocation {
    ResolvedLocation {
        context: default,
        display_city: format!("{} (Not Found)", city),
    }
}

/// A geocoder hit as a storable context; out-of-range coordinates are discarded
fn located_context(found: GeoLocation) -> Option<LocationContext> {
    let GpsCoordinates { latitude, longitude } = found.coordinates;
    if let Err(reason) = validate_coordinates(latitude, longitude) {
        tracing::warn!(
            city = %found.name,
            latitude,
            longitude,
            reason,
            "Geocoder returned unusable coordinates"
        );
        return None;
    }
    Some(LocationContext {
        coordinates: found.coordinates,
        city: found.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoder_hit_becomes_context() {
        let found = GeoLocation {
            coordinates: GpsCoordinates::new(18.5204, 73.8567),
            name: "Pune".to_string(),
        };
        let context = located_context(found).unwrap();
        assert_eq!(context.city, "Pune");
        assert_eq!(context.coordinates.latitude, 18.5204);
    }

    #[test]
    fn test_out_of_range_geocoder_hit_is_discarded() {
        let found = GeoLocation {
            coordinates: GpsCoordinates::new(123.0, 73.8567),
            name: "Nowhere".to_string(),
        };
        assert!(located_context(found).is_none());
    }

    #[test]
    fn test_not_found_uses_default_coordinates() {
        let resolved = not_found_location("Atlantis", LocationContext::default());
        assert_eq!(resolved.display_city, "Atlantis (Not Found)");
        assert_eq!(resolved.context, LocationContext::default());
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location: Ludhiana, Punjab (farming hub)
pub const DEFAULT_CITY: &str = "Ludhiana";
pub const DEFAULT_LATITUDE: f64 = 30.9010;
pub const DEFAULT_LONGITUDE: f64 = 75.8573;

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The location a user's dashboard and crop analysis run against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationContext {
    pub coordinates: GpsCoordinates,
    pub city: String,
}

impl Default for LocationContext {
    fn default() -> Self {
        Self {
            coordinates: GpsCoordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            city: DEFAULT_CITY.to_string(),
        }
    }
}

/// A string that does not name any variant of a domain enum
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Pagination parameters; absent fields take the defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, 100) as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.limit()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_is_ludhiana() {
        let ctx = LocationContext::default();
        assert_eq!(ctx.city, "Ludhiana");
        assert_eq!(ctx.coordinates, GpsCoordinates::new(30.9010, 75.8573));
    }

    #[test]
    fn test_pagination_bounds() {
        let p = Pagination { page: 0, per_page: 500 };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);

        let p = Pagination { page: 3, per_page: 20 };
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn test_pagination_missing_fields_use_defaults() {
        let empty: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!((empty.page, empty.per_page), (1, 20));

        let page_only: Pagination = serde_json::from_str(r#"{"page":4}"#).unwrap();
        assert_eq!((page_only.page, page_only.per_page), (4, 20));
    }
}

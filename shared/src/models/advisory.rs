//! Advisory models and the weather-driven advisory rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::weather::WeatherSnapshot;
use crate::types::UnknownVariant;

/// Maximum number of persisted advisories shown on the dashboard
pub const RECENT_PERSISTED_LIMIT: usize = 3;
/// Maximum number of advisories shown on the dashboard
pub const DISPLAY_LIMIT: usize = 5;

/// AQI above which the air is considered poor
pub const AQI_POOR_THRESHOLD: i32 = 150;
/// AQI above which the air is considered moderate
pub const AQI_MODERATE_THRESHOLD: i32 = 100;

/// Advisory severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            other => Err(UnknownVariant::new("severity", other)),
        }
    }
}

/// Where an advisory came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryOrigin {
    /// Admin-authored and stored in the database
    Persisted,
    /// Generated from live weather for this request, never stored
    Live,
}

/// An advisory as shown to users. Persisted and live advisories share this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advisory {
    /// Set for persisted advisories only
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub severity: Severity,
    pub date_posted: DateTime<Utc>,
    pub origin: AdvisoryOrigin,
}

impl Advisory {
    fn live(title: &str, content: String, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            content,
            severity,
            date_posted: now,
            origin: AdvisoryOrigin::Live,
        }
    }
}

/// Turn a weather reading into zero to two live advisories.
///
/// The AQI bands are mutually exclusive; the rainfall rule is independent and
/// always comes after the AQI advisory.
pub fn generate_live_advisories(weather: &WeatherSnapshot, now: DateTime<Utc>) -> Vec<Advisory> {
    let mut advisories = Vec::with_capacity(2);

    if weather.aqi > AQI_POOR_THRESHOLD {
        advisories.push(Advisory::live(
            "Poor Air Quality Alert",
            format!(
                "Current AQI is {}. Avoid burning crop residue. Working outdoors? Wear a mask.",
                weather.aqi
            ),
            Severity::High,
            now,
        ));
    } else if weather.aqi > AQI_MODERATE_THRESHOLD {
        advisories.push(Advisory::live(
            "Moderate Air Quality",
            format!(
                "AQI is {}. Sensitive groups should limit outdoor exertion.",
                weather.aqi
            ),
            Severity::Medium,
            now,
        ));
    }

    if weather.is_raining() {
        advisories.push(Advisory::live(
            "Rainfall Update",
            format!(
                "It is currently raining ({} mm). Delay irrigation and spraying.",
                weather.rainfall_mm
            ),
            Severity::Medium,
            now,
        ));
    }

    advisories
}

/// Build the dashboard list: live advisories first, then at most three of the
/// given persisted advisories (expected newest first), cut to five entries.
///
/// Persisted advisories are dropped from view when live conditions fill the list.
pub fn compose_display_advisories(live: Vec<Advisory>, persisted: Vec<Advisory>) -> Vec<Advisory> {
    live.into_iter()
        .chain(persisted.into_iter().take(RECENT_PERSISTED_LIMIT))
        .take(DISPLAY_LIMIT)
        .collect()
}

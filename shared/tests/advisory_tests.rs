//! Advisory pipeline tests
//!
//! Tests for the weather-driven advisory rules including:
//! - Quiet weather produces no advisories
//! - AQI bands are mutually exclusive
//! - Dashboard composition truncates to five, live first

use chrono::{Duration, Utc};
use proptest::prelude::*;
use shared::{
    compose_display_advisories, generate_live_advisories, Advisory, AdvisoryOrigin, Severity,
    WeatherSnapshot, DISPLAY_LIMIT,
};
use uuid::Uuid;

fn persisted(n: usize) -> Vec<Advisory> {
    let now = Utc::now();
    (0..n)
        .map(|i| Advisory {
            id: Some(Uuid::new_v4()),
            title: format!("Stored advisory {}", i),
            content: "Inspect fields.".to_string(),
            severity: Severity::Low,
            date_posted: now - Duration::hours(i as i64),
            origin: AdvisoryOrigin::Persisted,
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_two_live_and_three_persisted_fill_display() {
        let live = generate_live_advisories(&WeatherSnapshot::live(30.0, 3.0, 200), Utc::now());
        let display = compose_display_advisories(live, persisted(10));

        assert_eq!(display.len(), 5);
        assert_eq!(display[0].severity, Severity::High);
        assert_eq!(display[1].title, "Rainfall Update");
        assert_eq!(display[2].title, "Stored advisory 0");
        assert_eq!(display[4].title, "Stored advisory 2");
    }

    #[test]
    fn test_quiet_weather_shows_only_three_persisted() {
        let live = generate_live_advisories(&WeatherSnapshot::live(22.0, 0.0, 40), Utc::now());
        let display = compose_display_advisories(live, persisted(8));

        assert_eq!(display.len(), 3);
        assert!(display.iter().all(|a| a.origin == AdvisoryOrigin::Persisted));
    }

    #[test]
    fn test_fallback_snapshot_yields_no_live_advisories() {
        // Fallback AQI is exactly 100 and rainfall 0
        let live = generate_live_advisories(&WeatherSnapshot::fallback(), Utc::now());
        assert!(live.is_empty());
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Clean air and no rain never produce live advisories
        #[test]
        fn prop_quiet_weather_is_empty(aqi in 0i32..=100, temp in -10.0f64..50.0) {
            let live = generate_live_advisories(&WeatherSnapshot::live(temp, 0.0, aqi), Utc::now());
            prop_assert!(live.is_empty());
        }

        /// At most one AQI advisory, with severity matching the band
        #[test]
        fn prop_aqi_bands_exclusive(aqi in 101i32..500) {
            let live = generate_live_advisories(&WeatherSnapshot::live(25.0, 0.0, aqi), Utc::now());
            prop_assert_eq!(live.len(), 1);
            let expected = if aqi > 150 { Severity::High } else { Severity::Medium };
            prop_assert_eq!(live[0].severity, expected);
        }

        /// Rain with poor air gives exactly two advisories, AQI first
        #[test]
        fn prop_rain_and_poor_air(aqi in 151i32..500, rain in 0.01f64..200.0) {
            let live = generate_live_advisories(&WeatherSnapshot::live(25.0, rain, aqi), Utc::now());
            prop_assert_eq!(live.len(), 2);
            prop_assert_eq!(live[0].severity, Severity::High);
            prop_assert_eq!(live[1].title.as_str(), "Rainfall Update");
        }

        /// Display never exceeds five and live advisories always precede persisted ones
        #[test]
        fn prop_display_truncation(
            aqi in 0i32..400,
            rain in prop_oneof![Just(0.0f64), 0.1f64..50.0],
            stored in 0usize..12
        ) {
            let live = generate_live_advisories(&WeatherSnapshot::live(25.0, rain, aqi), Utc::now());
            let live_count = live.len();
            let display = compose_display_advisories(live, persisted(stored));

            prop_assert!(display.len() <= DISPLAY_LIMIT);
            prop_assert_eq!(display.len(), live_count + stored.min(3));
            let first_persisted = display
                .iter()
                .position(|a| a.origin == AdvisoryOrigin::Persisted)
                .unwrap_or(display.len());
            prop_assert!(display[first_persisted..]
                .iter()
                .all(|a| a.origin == AdvisoryOrigin::Persisted));
            prop_assert_eq!(first_persisted, live_count);
        }
    }
}

//! CSV export tests
//!
//! The export has a fixed header, one row per persisted advisory and three
//! trailing rows for today's temperature, rainfall and AQI.

use agri_air::services::ReportingService;
use chrono::{NaiveDate, TimeZone, Utc};
use shared::{Advisory, AdvisoryOrigin, Severity, WeatherSnapshot};
use uuid::Uuid;

fn advisory(title: &str, severity: Severity, day: u32) -> Advisory {
    Advisory {
        id: Some(Uuid::new_v4()),
        title: title.to_string(),
        content: "Details".to_string(),
        severity,
        date_posted: Utc.with_ymd_and_hms(2024, 7, day, 9, 30, 0).unwrap(),
        origin: AdvisoryOrigin::Persisted,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_export_layout() {
        let advisories = vec![
            advisory("Heavy Rainfall Alert", Severity::High, 12),
            advisory("Pest Warning: Aphids", Severity::Medium, 10),
        ];
        let weather = WeatherSnapshot::live(31.5, 2.0, 142);

        let csv = ReportingService::export_to_csv(&advisories, &weather, today()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Date,Type,Detail,Severity/Value",
                "2024-07-12,Advisory,Heavy Rainfall Alert,HIGH",
                "2024-07-10,Advisory,Pest Warning: Aphids,MEDIUM",
                "2024-07-15,Weather Log,Temperature,31.5 C",
                "2024-07-15,Weather Log,Rainfall,2 mm",
                "2024-07-15,Environment,AQI,142",
            ]
        );
    }

    #[test]
    fn test_export_without_advisories_uses_fallback_weather() {
        let csv =
            ReportingService::export_to_csv(&[], &WeatherSnapshot::fallback(), today()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2024-07-15,Weather Log,Temperature,25 C");
        assert_eq!(lines[2], "2024-07-15,Weather Log,Rainfall,0 mm");
        assert_eq!(lines[3], "2024-07-15,Environment,AQI,100");
    }

    #[test]
    fn test_titles_with_commas_are_quoted() {
        let advisories = vec![advisory("Frost, then rain", Severity::Low, 1)];
        let csv = ReportingService::export_to_csv(
            &advisories,
            &WeatherSnapshot::fallback(),
            today(),
        )
        .unwrap();
        assert!(csv.contains("2024-07-01,Advisory,\"Frost, then rain\",LOW"));
    }
}

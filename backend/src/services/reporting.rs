//! CSV export of advisories and the current weather log

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use shared::{Advisory, WeatherSnapshot};

pub const EXPORT_FILENAME: &str = "farming_report.csv";

const HEADER: [&str; 4] = ["Date", "Type", "Detail", "Severity/Value"];

/// Reporting service
pub struct ReportingService;

impl ReportingService {
    /// One row per persisted advisory, then today's temperature, rainfall
    /// and AQI readings
    pub fn export_to_csv(
        advisories: &[Advisory],
        weather: &WeatherSnapshot,
        today: NaiveDate,
    ) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(HEADER).map_err(csv_error)?;

        for advisory in advisories {
            writer
                .write_record([
                    advisory.date_posted.format("%Y-%m-%d").to_string().as_str(),
                    "Advisory",
                    advisory.title.as_str(),
                    advisory.severity.as_str(),
                ])
                .map_err(csv_error)?;
        }

        let today = today.format("%Y-%m-%d").to_string();
        let temperature = format!("{} C", weather.temperature_celsius);
        let rainfall = format!("{} mm", weather.rainfall_mm);
        let aqi = weather.aqi.to_string();

        for row in [
            [today.as_str(), "Weather Log", "Temperature", temperature.as_str()],
            [today.as_str(), "Weather Log", "Rainfall", rainfall.as_str()],
            [today.as_str(), "Environment", "AQI", aqi.as_str()],
        ] {
            writer.write_record(row).map_err(csv_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
    }
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("CSV write failed: {}", e))
}

//! Crop suggestion engine
//!
//! Compares a crop's optimal temperature range and water need against the
//! live weather at the user's location and produces guidance lines.

use crate::models::{CropProfile, WeatherSnapshot};

/// Rainfall in millimetres above which irrigation must stop entirely
pub const HEAVY_RAIN_MM: f64 = 5.0;

/// Returned alone when the weather fetch fell back to constants
pub const WEATHER_UNAVAILABLE: &str = "Unable to fetch live weather data for analysis.";

/// Where the current temperature sits relative to the crop's optimal range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureVerdict {
    HeatStress,
    ColdStress,
    NearOptimal,
}

/// Rainfall guidance, if any applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainfallVerdict {
    HeavyRain,
    LightRain,
    EnsureIrrigation,
}

/// Hotter than max wins over colder than min; otherwise near optimal.
pub fn temperature_verdict(profile: &CropProfile, temperature_celsius: f64) -> TemperatureVerdict {
    if temperature_celsius > profile.optimal_temp_max {
        TemperatureVerdict::HeatStress
    } else if temperature_celsius < profile.optimal_temp_min {
        TemperatureVerdict::ColdStress
    } else {
        TemperatureVerdict::NearOptimal
    }
}

pub fn rainfall_verdict(profile: &CropProfile, rainfall_mm: f64) -> Option<RainfallVerdict> {
    if rainfall_mm > HEAVY_RAIN_MM {
        Some(RainfallVerdict::HeavyRain)
    } else if rainfall_mm > 0.0 {
        Some(RainfallVerdict::LightRain)
    } else if profile.needs_high_water() {
        Some(RainfallVerdict::EnsureIrrigation)
    } else {
        None
    }
}

/// Produce the guidance lines for a crop at a location: a header, one
/// temperature verdict, and at most one rainfall verdict.
pub fn smart_suggestions(profile: &CropProfile, weather: &WeatherSnapshot, city: &str) -> Vec<String> {
    if !weather.success {
        return vec![WEATHER_UNAVAILABLE.to_string()];
    }

    let temp = weather.temperature_celsius;
    let rain = weather.rainfall_mm;
    let valid_range = format!("{}-{}°C", profile.optimal_temp_min, profile.optimal_temp_max);

    let mut suggestions = Vec::with_capacity(3);
    suggestions.push(format!(
        "Analysis for **{}** | Temp: {}°C | Rain: {}mm",
        city, temp, rain
    ));

    suggestions.push(match temperature_verdict(profile, temp) {
        TemperatureVerdict::HeatStress => format!(
            "⚠️ **Heat Stress Alert**: Current temp ({}°C) is hotter than optimal ({}). \
             Suggestion: Increase irrigation frequency and apply mulch.",
            temp, valid_range
        ),
        TemperatureVerdict::ColdStress => format!(
            "❄️ **Cold Stress Alert**: Current temp ({}°C) is too cold (Optimal: {}). \
             Suggestion: Use row covers or delay sowing if possible.",
            temp, valid_range
        ),
        TemperatureVerdict::NearOptimal => format!(
            "✅ Temperature is near optimal ({}°C). Excellent growth conditions.",
            temp
        ),
    });

    match rainfall_verdict(profile, rain) {
        Some(RainfallVerdict::HeavyRain) => suggestions.push(format!(
            "🌧️ **Heavy Rain**: {}mm rainfall detected. DO NOT irrigate. Check drainage.",
            rain
        )),
        Some(RainfallVerdict::LightRain) => suggestions.push(format!(
            "☁️ **Light Rain**: {}mm rainfall. Skip today's irrigation cycle.",
            rain
        )),
        Some(RainfallVerdict::EnsureIrrigation) => suggestions.push(
            "💧 **Water Need**: No rain today and this is a High-water crop. Ensure sufficient irrigation."
                .to_string(),
        ),
        None => {}
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::resolve_local_profile;

    #[test]
    fn test_unavailable_weather_short_circuits() {
        let profile = resolve_local_profile("Rice", None);
        let lines = smart_suggestions(&profile, &WeatherSnapshot::fallback(), "Ludhiana");
        assert_eq!(lines, vec![WEATHER_UNAVAILABLE.to_string()]);
    }

    #[test]
    fn test_hot_day_on_tomato() {
        let profile = resolve_local_profile("Tomato", None);
        let lines = smart_suggestions(&profile, &WeatherSnapshot::live(35.0, 0.0, 50), "Pune");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Analysis for **Pune** | Temp: 35°C | Rain: 0mm");
        assert!(lines[1].contains("hotter than optimal (18-30°C)"));
        assert!(!lines.iter().any(|l| l.contains("near optimal")));
    }

    #[test]
    fn test_cold_day() {
        let profile = resolve_local_profile("Mango", None);
        let lines = smart_suggestions(&profile, &WeatherSnapshot::live(12.5, 0.0, 50), "Shimla");
        assert!(lines[1].contains("too cold (Optimal: 24-35°C)"));
    }

    #[test]
    fn test_rain_bands() {
        let rice = resolve_local_profile("Rice", None);

        let heavy = smart_suggestions(&rice, &WeatherSnapshot::live(25.0, 10.0, 50), "X");
        assert_eq!(heavy.len(), 3);
        assert!(heavy[2].contains("Heavy Rain"));

        let at_threshold = smart_suggestions(&rice, &WeatherSnapshot::live(25.0, 5.0, 50), "X");
        assert!(at_threshold[2].contains("Light Rain"));

        let dry = smart_suggestions(&rice, &WeatherSnapshot::live(25.0, 0.0, 50), "X");
        assert!(dry[2].contains("High-water crop"));

        let wheat = resolve_local_profile("Wheat", None);
        let dry_medium = smart_suggestions(&wheat, &WeatherSnapshot::live(20.0, 0.0, 50), "X");
        assert_eq!(dry_medium.len(), 2);
        assert!(dry_medium[1].contains("near optimal"));
    }
}

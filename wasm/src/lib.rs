//! WebAssembly module for the AgriAir farming advisory platform
//!
//! Lets the browser evaluate the same rules the server applies:
//! - Live advisories from a weather reading
//! - Crop suggestions against current weather
//! - Local crop knowledge lookup
//!
//! Values cross the boundary as JSON strings.

use chrono::{DateTime, TimeZone, Utc};
use wasm_bindgen::prelude::*;

pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("AgriAir WASM module loaded"));
}

/// Live advisories for a `WeatherSnapshot` JSON, stamped with the browser clock
#[wasm_bindgen]
pub fn live_advisories(weather_json: &str) -> Result<String, JsValue> {
    let now = Utc
        .timestamp_millis_opt(js_sys::Date::now() as i64)
        .single()
        .unwrap_or_else(Utc::now);
    advisories_for(weather_json, now).map_err(|e| JsValue::from_str(&e))
}

/// Suggestion lines for a `CropProfile` JSON at a location
#[wasm_bindgen]
pub fn crop_suggestions(profile_json: &str, weather_json: &str, city: &str) -> Result<String, JsValue> {
    suggestions_for(profile_json, weather_json, city).map_err(|e| JsValue::from_str(&e))
}

/// Offline crop profile from the built-in table, as JSON
#[wasm_bindgen]
pub fn lookup_crop_profile(name: &str) -> Result<String, JsValue> {
    profile_for(name).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn is_valid_temperature_range(min: f64, max: f64) -> bool {
    validate_temperature_range(min, max).is_ok()
}

fn advisories_for(weather_json: &str, now: DateTime<Utc>) -> Result<String, String> {
    let weather: WeatherSnapshot = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;
    let advisories = generate_live_advisories(&weather, now);
    serde_json::to_string(&advisories).map_err(|e| e.to_string())
}

fn suggestions_for(profile_json: &str, weather_json: &str, city: &str) -> Result<String, String> {
    let profile: CropProfile = serde_json::from_str(profile_json)
        .map_err(|e| format!("Invalid crop profile JSON: {}", e))?;
    let weather: WeatherSnapshot = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;
    let lines = shared::smart_suggestions(&profile, &weather, city);
    serde_json::to_string(&lines).map_err(|e| e.to_string())
}

fn profile_for(name: &str) -> Result<String, String> {
    shared::validate_crop_name(name)?;
    let profile = shared::resolve_local_profile(name.trim(), None);
    serde_json::to_string(&profile).map_err(|e| e.to_string())
}

//! Crop models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crop logged by a user, with its agronomic profile filled in at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    #[serde(flatten)]
    pub profile: CropProfile,
    pub image_url: Option<String>,
    /// Date the crop was planted
    pub planted_date: Option<NaiveDate>,
    /// Expected or actual harvest date
    pub harvested_date: Option<NaiveDate>,
    /// Show this crop on the dashboard for daily tracking
    pub is_tracked: bool,
    pub created_at: DateTime<Utc>,
}

/// Agronomic parameters for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub description: String,
    /// Minimum optimal temperature in Celsius
    pub optimal_temp_min: f64,
    /// Maximum optimal temperature in Celsius
    pub optimal_temp_max: f64,
    /// e.g. High, Medium, Low
    pub water_requirement: String,
    pub soil_type: String,
    pub fertilizers: String,
    pub manures: String,
    pub pesticides: String,
}

impl CropProfile {
    /// True when the crop's water requirement reads "high" in any casing
    pub fn needs_high_water(&self) -> bool {
        self.water_requirement.trim().eq_ignore_ascii_case("high")
    }

    pub fn has_valid_range(&self) -> bool {
        self.optimal_temp_min <= self.optimal_temp_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(water: &str) -> CropProfile {
        CropProfile {
            description: String::new(),
            optimal_temp_min: 20.0,
            optimal_temp_max: 35.0,
            water_requirement: water.to_string(),
            soil_type: "Clayey/Loam".to_string(),
            fertilizers: String::new(),
            manures: String::new(),
            pesticides: String::new(),
        }
    }

    #[test]
    fn test_high_water_is_case_insensitive() {
        assert!(profile("High").needs_high_water());
        assert!(profile("HIGH").needs_high_water());
        assert!(profile(" high ").needs_high_water());
        assert!(!profile("Medium").needs_high_water());
        assert!(!profile("Low-Medium").needs_high_water());
    }
}

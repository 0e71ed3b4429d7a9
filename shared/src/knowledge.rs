//! Local agronomic knowledge base
//!
//! The last two stages of crop knowledge resolution: a hand-curated lookup
//! table keyed by crop name fragments, and generic defaults for anything the
//! table does not know.

use crate::models::CropProfile;

/// A hand-curated agronomic record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownCrop {
    pub key: &'static str,
    pub min_temp: f64,
    pub max_temp: f64,
    pub water: &'static str,
    pub soil: &'static str,
    pub fertilizers: &'static str,
    pub manures: &'static str,
    pub pesticides: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn known(
    key: &'static str,
    min_temp: f64,
    max_temp: f64,
    water: &'static str,
    soil: &'static str,
    fertilizers: &'static str,
    manures: &'static str,
    pesticides: &'static str,
) -> KnownCrop {
    KnownCrop {
        key,
        min_temp,
        max_temp,
        water,
        soil,
        fertilizers,
        manures,
        pesticides,
    }
}

/// Lookup order matters: the first key contained in the crop name wins.
pub const KNOWLEDGE_BASE: &[KnownCrop] = &[
    // Cereals & grains
    known("wheat", 10.0, 25.0, "Medium", "Loamy/Clay", "Nitrogen: 120kg, Phosphorus: 60kg, Potassium: 40kg per ha", "FYM @ 10-15 tonnes/ha", "Termites: Chlorpyriphos"),
    known("rice", 20.0, 35.0, "High", "Clayey/Loam", "Urea (split), DAP, MOP, Zinc", "Green Manure (Dhaincha)", "Stem Borer: Cartap"),
    known("maize", 18.0, 32.0, "Medium", "Well-drained Loam", "NPK 120:60:40 + Zinc", "Cow Dung / Compost", "Fall Armyworm: Emamectin"),
    known("barley", 12.0, 25.0, "Low-Medium", "Sandy Loam", "NPK 60:30:20", "FYM", "Aphids: Imidacloprid"),
    known("millet", 25.0, 35.0, "Low", "Sandy/Shallow", "Nitrogen low requirement", "Organic Mulch", "Shoot Fly: Cypermethrin"),
    // Cash crops
    known("sugarcane", 20.0, 35.0, "High", "Deep Loam", "Heavy NPK user + Micronutrients", "Press Mud / Compost", "Top Borer: Carbofuran"),
    known("cotton", 21.0, 35.0, "Medium", "Black Soil", "NPK 120:60:60", "FYM", "Pink Bollworm: Pheromone Traps"),
    known("jute", 24.0, 35.0, "High", "Alluvial", "Urea, NPK", "Compost", "Hairy Caterpillar"),
    known("tobacco", 20.0, 30.0, "Medium", "Red/Loamy", "High Potash, Low Chloride", "Green Manure", "Caterpillars"),
    // Vegetables
    known("tomato", 18.0, 30.0, "Medium", "Sandy Loam", "NPK 19:19:19, Calcium Nitrate", "Vermicompost", "Whitefly: Acetamiprid"),
    known("potato", 15.0, 25.0, "Medium", "Loose Loam", "High Potassium (SOP)", "Poultry Manure", "Late Blight: Mancozeb"),
    known("onion", 12.0, 25.0, "Medium", "Friable Loam", "Sulphur rich fertilizers", "FYM", "Thrips: Fipronil"),
    known("brinjal", 20.0, 30.0, "Medium", "Silt Loam", "NPK 100:50:50", "Neem Cake", "Fruit Borer: Spinosad"),
    known("okra", 22.0, 35.0, "Medium", "Sandy Loam", "Urea, SSP", "Compost", "Jassids/Shoot Borer"),
    known("cabbage", 15.0, 22.0, "Medium", "Loam", "Nitrogen heavy", "FYM", "Diamond Back Moth"),
    known("cauliflower", 15.0, 22.0, "Medium", "Loam", "Boron & Molybdenum critical", "Vermicompost", "Aphids"),
    known("chilli", 20.0, 30.0, "Medium", "Black/Loamy", "NPK + Sulphur", "Neem Cake", "Thrips/Mites"),
    known("spinach", 10.0, 22.0, "Medium", "Loam", "Urea (Nitrogen)", "Leaf Mould", "Leaf Miner"),
    // Fruits
    known("mango", 24.0, 35.0, "Medium", "Alluvial/Laterite", "NPK yearly per age", "Bone Meal + FYM", "Hopper: Imidacloprid"),
    known("banana", 25.0, 30.0, "High", "Rich Loam", "High Potash & Nitrogen", "Compost heap", "Weevil"),
    known("citrus", 15.0, 30.0, "Medium", "Well-drained", "Micronutrients (Iron/Zinc)", "FYM", "Leaf Miner/Psylla"),
    known("guava", 20.0, 30.0, "Low-Medium", "Any well-drained", "NPK", "FYM", "Fruit Fly"),
    known("apple", 5.0, 22.0, "Medium", "Hill Soil", "NPK + Boron", "Compost", "Scab/Mites"),
    known("papaya", 22.0, 32.0, "Medium", "Fertile Loam", "Frequent Nitrogen", "Vermicompost", "Mealy Bug"),
    // Pulses & legumes
    known("chickpea", 15.0, 25.0, "Low", "Sandy Loam", "DAP (Phosphorus)", "Rhizobium", "Pod Borer"),
    known("soybean", 25.0, 35.0, "Medium", "Well Drained", "Sulphur + Phosphorus", "Rhizobium", "Girdle Beetle"),
    known("groundnut", 22.0, 30.0, "Medium", "Sandy Loam", "Gypsum (Calcium/Sulphur)", "FYM", "White Grub"),
    known("mustard", 10.0, 25.0, "Medium", "Loam", "Sulphur (SSP) is key", "FYM", "Aphids"),
    known("lentil", 15.0, 25.0, "Low", "Light Loam", "DAP", "None usually", "Pod Borer"),
    known("turmeric", 20.0, 35.0, "High", "Loam", "Heavy Potash", "Heavy Organic Matter", "Rhizome Fly"),
];

pub const DEFAULT_MIN_TEMP: f64 = 20.0;
pub const DEFAULT_MAX_TEMP: f64 = 30.0;
pub const DEFAULT_WATER: &str = "Medium";
pub const DEFAULT_SOIL: &str = "Loamy";
pub const DEFAULT_FERTILIZERS: &str = "Standard NPK 10:10:10";
pub const DEFAULT_MANURES: &str = "General Organic Compost";
pub const DEFAULT_PESTICIDES: &str = "Neem Oil (Bio-pesticide)";

/// Find the table entry for a crop name.
///
/// The name is lowercased and trimmed, then each key is tested as a substring
/// in table order. "Ricegrass" therefore matches "rice".
pub fn lookup_known_crop(name: &str) -> Option<&'static KnownCrop> {
    let name_key = name.trim().to_lowercase();
    KNOWLEDGE_BASE.iter().find(|known| name_key.contains(known.key))
}

/// Description used when neither the AI nor the encyclopedia produced one
pub fn default_description(name: &str) -> String {
    format!("A crop named {}. Add specific description manually.", name)
}

/// Generic profile for a crop nothing else knows about
pub fn default_profile(name: &str, summary: Option<String>) -> CropProfile {
    CropProfile {
        description: summary.unwrap_or_else(|| default_description(name)),
        optimal_temp_min: DEFAULT_MIN_TEMP,
        optimal_temp_max: DEFAULT_MAX_TEMP,
        water_requirement: DEFAULT_WATER.to_string(),
        soil_type: DEFAULT_SOIL.to_string(),
        fertilizers: DEFAULT_FERTILIZERS.to_string(),
        manures: DEFAULT_MANURES.to_string(),
        pesticides: DEFAULT_PESTICIDES.to_string(),
    }
}

impl KnownCrop {
    /// Overlay this record's agronomic fields on a profile, keeping its description
    pub fn apply_to(&self, profile: &mut CropProfile) {
        profile.optimal_temp_min = self.min_temp;
        profile.optimal_temp_max = self.max_temp;
        profile.water_requirement = self.water.to_string();
        profile.soil_type = self.soil.to_string();
        profile.fertilizers = self.fertilizers.to_string();
        profile.manures = self.manures.to_string();
        profile.pesticides = self.pesticides.to_string();
    }
}

/// Resolve a profile without the AI stage: defaults, with the encyclopedia
/// summary as description when present, overlaid by the table match if any.
pub fn resolve_local_profile(name: &str, summary: Option<String>) -> CropProfile {
    let mut profile = default_profile(name, summary);
    if let Some(known) = lookup_known_crop(name) {
        known.apply_to(&mut profile);
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_thirty_ordered_entries() {
        assert_eq!(KNOWLEDGE_BASE.len(), 30);
        assert_eq!(KNOWLEDGE_BASE[0].key, "wheat");
        assert_eq!(KNOWLEDGE_BASE[29].key, "turmeric");
        assert!(KNOWLEDGE_BASE.iter().all(|k| k.min_temp <= k.max_temp));
    }

    #[test]
    fn test_lookup_normalizes_name() {
        assert_eq!(lookup_known_crop("  Wheat ").map(|k| k.key), Some("wheat"));
        assert_eq!(lookup_known_crop("Basmati Rice").map(|k| k.key), Some("rice"));
        assert_eq!(lookup_known_crop("cherry TOMATO").map(|k| k.key), Some("tomato"));
        assert!(lookup_known_crop("Quinoaxyz").is_none());
    }

    #[test]
    fn test_lookup_substring_is_order_dependent() {
        assert_eq!(lookup_known_crop("Ricegrass").map(|k| k.key), Some("rice"));
        assert_eq!(lookup_known_crop("wheat rice mix").map(|k| k.key), Some("wheat"));
    }

    #[test]
    fn test_local_profile_keeps_summary_description() {
        let summary = Some("Wheat is a grass widely cultivated for its seed.".to_string());
        let profile = resolve_local_profile("Wheat", summary.clone());
        assert_eq!(Some(profile.description), summary);
        assert_eq!(profile.optimal_temp_min, 10.0);
        assert_eq!(profile.optimal_temp_max, 25.0);
        assert_eq!(profile.water_requirement, "Medium");
        assert_eq!(profile.soil_type, "Loamy/Clay");
    }

    #[test]
    fn test_unknown_crop_gets_defaults() {
        let profile = resolve_local_profile("Quinoaxyz", None);
        assert_eq!(
            profile.description,
            "A crop named Quinoaxyz. Add specific description manually."
        );
        assert_eq!(profile.optimal_temp_min, 20.0);
        assert_eq!(profile.optimal_temp_max, 30.0);
        assert_eq!(profile.water_requirement, "Medium");
        assert_eq!(profile.soil_type, "Loamy");
        assert_eq!(profile.pesticides, "Neem Oil (Bio-pesticide)");
    }
}

//! Gemini client for generating crop agronomy profiles
//!
//! The model is asked for a bare JSON object; replies are accepted with or
//! without a markdown code fence around it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::CropProfile;
use std::time::Duration;

use super::{check_status, FetchError};
use crate::config::AiConfig;

/// Generative AI client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

/// The JSON object the prompt asks the model to return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiCropProfile {
    pub description: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub water: String,
    pub soil: String,
    pub fertilizers: String,
    pub manures: String,
    pub pesticides: String,
}

impl From<AiCropProfile> for CropProfile {
    fn from(ai: AiCropProfile) -> Self {
        CropProfile {
            description: ai.description,
            optimal_temp_min: ai.min_temp,
            optimal_temp_max: ai.max_temp,
            water_requirement: ai.water,
            soil_type: ai.soil,
            fertilizers: ai.fertilizers,
            manures: ai.manures,
            pesticides: ai.pesticides,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key().map(str::to_string),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model for the agronomic profile of a crop
    pub async fn crop_profile(&self, crop_name: &str) -> Result<CropProfile, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("AI API key"))?;

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request = json!({
            "contents": [{ "parts": [{ "text": crop_prompt(crop_name) }] }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        let text = extract_text(&body)?;
        parse_crop_profile(&text)
    }
}

fn crop_prompt(crop_name: &str) -> String {
    format!(
        "Provide agricultural details for the crop '{}' in strictly valid JSON format. \
         Keys required: \
         'description' (string, 2-3 sentences), \
         'min_temp' (number, Celsius), \
         'max_temp' (number, Celsius), \
         'water' (string: Low/Medium/High), \
         'soil' (string, suitable soil type), \
         'fertilizers' (string, recommended NPK or specific), \
         'manures' (string, organic options), \
         'pesticides' (string, common pests and solutions). \
         Do not include markdown formatting like ```json.",
        crop_name
    )
}

fn extract_text(body: &str) -> Result<String, FetchError> {
    let data: GenerateContentResponse = serde_json::from_str(body)?;
    data.candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(FetchError::Empty("model candidates"))
}

/// Remove a surrounding markdown code fence, if any
pub fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse the model reply; an inverted temperature range counts as a failure
pub fn parse_crop_profile(text: &str) -> Result<CropProfile, FetchError> {
    let ai: AiCropProfile = serde_json::from_str(strip_code_fence(text))?;
    if ai.min_temp > ai.max_temp {
        return Err(FetchError::InvalidPayload(format!(
            "min_temp {} exceeds max_temp {}",
            ai.min_temp, ai.max_temp
        )));
    }
    Ok(ai.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_JSON: &str = r#"{
        "description": "Quinoa is a flowering plant grown for its edible seeds.",
        "min_temp": 15,
        "max_temp": 28.5,
        "water": "Low",
        "soil": "Sandy Loam",
        "fertilizers": "NPK 80:40:40",
        "manures": "FYM",
        "pesticides": "Aphids: Neem oil"
    }"#;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[test]
    fn test_parse_fenced_profile() {
        let fenced = format!("```json\n{}\n```", PROFILE_JSON);
        let profile = parse_crop_profile(&fenced).unwrap();
        assert_eq!(profile.optimal_temp_min, 15.0);
        assert_eq!(profile.optimal_temp_max, 28.5);
        assert_eq!(profile.water_requirement, "Low");
        assert_eq!(profile.soil_type, "Sandy Loam");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let inverted = PROFILE_JSON
            .replace("\"min_temp\": 15", "\"min_temp\": 40")
            .replace("\"max_temp\": 28.5", "\"max_temp\": 10");
        assert!(matches!(
            parse_crop_profile(&inverted),
            Err(FetchError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_malformed_reply_is_rejected() {
        assert!(matches!(
            parse_crop_profile("Sure! Here are the details for quinoa."),
            Err(FetchError::Decode(_))
        ));
        assert!(parse_crop_profile(r#"{"description":"x"}"#).is_err());
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{}"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "{}");
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(FetchError::Empty(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = GeminiClient::new(&AiConfig {
            api_key: Some("YOUR_GEMINI_API_KEY".to_string()),
            model: "gemini-1.5-flash".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        });
        assert!(!client.is_configured());
        assert!(matches!(
            client.crop_profile("Wheat").await,
            Err(FetchError::NotConfigured(_))
        ));
    }
}

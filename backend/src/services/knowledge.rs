//! Crop knowledge resolution
//!
//! Stages, first success wins:
//! 1. Generative AI profile (returned as-is)
//! 2. Encyclopedia summary, used only as the description
//! 3. Local knowledge table overlay
//! 4. Generic defaults

use shared::{resolve_local_profile, CropProfile};

use crate::config::Config;
use crate::external::{GeminiClient, WikipediaClient};

/// Knowledge resolver
#[derive(Clone)]
pub struct KnowledgeService {
    ai: GeminiClient,
    encyclopedia: WikipediaClient,
}

impl KnowledgeService {
    pub fn new(config: &Config) -> Self {
        Self {
            ai: GeminiClient::new(&config.ai),
            encyclopedia: WikipediaClient::new(&config.encyclopedia),
        }
    }

    pub fn with_clients(ai: GeminiClient, encyclopedia: WikipediaClient) -> Self {
        Self { ai, encyclopedia }
    }

    /// Resolve an agronomic profile for a crop name. Never fails.
    pub async fn resolve(&self, crop_name: &str) -> CropProfile {
        match self.ai.crop_profile(crop_name).await {
            Ok(profile) => {
                tracing::debug!(crop = crop_name, "Crop profile resolved by AI");
                return profile;
            }
            Err(e) => {
                tracing::warn!(crop = crop_name, error = %e, "AI crop profile unavailable");
            }
        }

        let summary = match self.encyclopedia.summary(crop_name).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(crop = crop_name, error = %e, "Encyclopedia summary unavailable");
                None
            }
        };

        resolve_local_profile(crop_name, summary)
    }
}

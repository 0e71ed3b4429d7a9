//! Wikipedia REST client for one-paragraph topic summaries

use reqwest::{header::USER_AGENT, Client, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{check_status, FetchError};
use crate::config::EncyclopediaConfig;

/// Encyclopedia summary client
#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

impl WikipediaClient {
    pub fn new(config: &EncyclopediaConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Fetch the lead paragraph for a topic
    pub async fn summary(&self, topic: &str) -> Result<String, FetchError> {
        let url = summary_url(&self.base_url, topic)?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        parse_summary(&body)
    }
}

/// `{base}/page/summary/{title}` with the title pushed as one encoded segment
fn summary_url(base_url: &str, topic: &str) -> Result<Url, FetchError> {
    let title = title_segment(topic);
    let mut url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .push("page")
        .push("summary")
        .push(&title);
    Ok(url)
}

/// Page titles use underscores for spaces
fn title_segment(topic: &str) -> String {
    topic.trim().replace(' ', "_")
}

fn parse_summary(body: &str) -> Result<String, FetchError> {
    let data: SummaryResponse = serde_json::from_str(body)?;
    data.extract
        .map(|extract| extract.trim().to_string())
        .filter(|extract| !extract.is_empty())
        .ok_or(FetchError::Empty("summary extract"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_segment() {
        assert_eq!(title_segment(" Basmati rice "), "Basmati_rice");
        assert_eq!(title_segment("Wheat"), "Wheat");
    }

    #[test]
    fn test_summary_url_encodes_title() {
        let base = "https://en.wikipedia.org/api/rest_v1";
        assert_eq!(
            summary_url(base, "Basmati rice").unwrap().as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Basmati_rice"
        );

        let url = summary_url(base, "Rice?").unwrap();
        assert_eq!(url.path(), "/api/rest_v1/page/summary/Rice%3F");
        assert_eq!(url.query(), None);

        let url = summary_url(&format!("{}/", base), "Okra#pods").unwrap();
        assert_eq!(url.path(), "/api/rest_v1/page/summary/Okra%23pods");
        assert_eq!(url.fragment(), None);

        assert_eq!(
            summary_url(base, "A/B").unwrap().path(),
            "/api/rest_v1/page/summary/A%2FB"
        );
        assert!(matches!(summary_url("not a url", "Rice"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_summary() {
        let body = r#"{"type":"standard","title":"Wheat","extract":"Wheat is a group of wild and domesticated grasses."}"#;
        assert_eq!(
            parse_summary(body).unwrap(),
            "Wheat is a group of wild and domesticated grasses."
        );
        assert!(matches!(
            parse_summary(r#"{"title":"Not found."}"#),
            Err(FetchError::Empty(_))
        ));
        assert!(matches!(
            parse_summary(r#"{"extract":"  "}"#),
            Err(FetchError::Empty(_))
        ));
    }
}

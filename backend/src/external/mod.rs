//! External API integrations
//!
//! Every client here returns `Result<_, FetchError>`. Callers in the service
//! layer log the error and substitute a fallback; remote failures never reach
//! an HTTP response.

use thiserror::Error;

pub mod gemini;
pub mod open_meteo;
pub mod wikipedia;

pub use gemini::GeminiClient;
pub use open_meteo::OpenMeteoClient;
pub use wikipedia::WikipediaClient;

/// Why a remote lookup produced nothing usable
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no {0}")]
    Empty(&'static str),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Turn a non-2xx response into `FetchError::Status`
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, FetchError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Status { status, body })
}

//! Headless-render collaborator client
//!
//! Fetches the fully rendered HTML of a third-party page so the embedding
//! verifier can inspect markup that only exists after client-side scripts
//! run. Content-only fetches: no screenshot or favicon capture.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("reviewsup-api/", env!("CARGO_PKG_VERSION"));

/// Renderer client errors
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Renderer error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Capability flags sent with a render request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
    url: &'a str,
    content_enable: bool,
    favicon_enable: bool,
    screenshot_enable: bool,
}

/// Rendered page payload; only the HTML content is used here
#[derive(Debug, Clone, Deserialize)]
pub struct RenderedPage {
    pub content: String,
}

/// Client for the headless-render collaborator
#[derive(Debug, Clone)]
pub struct RendererClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RendererClient {
    /// Outbound fetches carry a fixed timeout and are never retried;
    /// failures propagate to the caller unchanged.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, RendererError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RendererError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the rendered HTML content of `url`
    pub async fn extract_content(&self, url: &str) -> Result<RenderedPage, RendererError> {
        let request = RenderRequest {
            url,
            content_enable: true,
            favicon_enable: false,
            screenshot_enable: false,
        };

        tracing::debug!(target_url = url, "Requesting rendered content");

        let response = self
            .http_client
            .post(format!("{}/content", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RendererError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RendererError::Api(status.as_u16(), error_text));
        }

        response
            .json::<RenderedPage>()
            .await
            .map_err(|e| RendererError::Parse(e.to_string()))
    }
}

//! Client for a browserless-style rendering service.
//!
//! A real browser render is the most expensive way to get a page, so it runs
//! last and only when an endpoint is configured. The service contract is
//! `POST {base}/content` with `{"url": ...}` returning the rendered document.
//! Everything here is plain HTTP; render failure never fails a profiling run.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use siteprofiler_shared::{Result, SiteProfilerError};

/// Rendered documents at or below this size are treated as render misses.
pub const MIN_RENDERED_LEN: usize = 1000;

/// Browser startup plus page load can be slow; give renders extra room.
const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the rendering service.
pub struct RenderClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl RenderClient {
    /// Create a client for the service at `endpoint` (base URL, no path).
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(RENDER_TIMEOUT)
            .build()
            .map_err(|e| {
                SiteProfilerError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Render `url` and return the document HTML.
    pub async fn render(&self, url: &Url) -> Result<String> {
        debug!(%url, "requesting browser render");

        let mut request = self
            .client
            .post(format!("{}/content", self.endpoint))
            .json(&json!({ "url": url.as_str() }));
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SiteProfilerError::Render(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteProfilerError::Render(format!(
                "render service returned HTTP {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SiteProfilerError::Render(format!("render body read failed: {e}")))
    }

    /// Render, degrading failures and thin results to `None`.
    pub async fn try_render(&self, url: &Url) -> Option<String> {
        match self.render(url).await {
            Ok(html) if html.len() > MIN_RENDERED_LEN => Some(html),
            Ok(html) => {
                debug!(%url, len = html.len(), "rendered document too small, ignoring");
                None
            }
            Err(e) => {
                warn!(%url, error = %e, "browser render failed, continuing without it");
                None
            }
        }
    }
}

//! HTTP page fetcher with SSRF protection.
//!
//! One [`PageFetcher`] serves a whole profiling run. The main page and
//! auxiliary pages share a client but use different timeouts, and only the
//! main page treats failure as fatal.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use siteprofiler_shared::{ProfileConfig, Result, SiteProfilerError};

/// User-Agent string for profile requests. The browser-like prefix matters:
/// some sites serve empty shells to unknown agents.
const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; SiteProfiler/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Normalize user input into a fetchable URL, prefixing `https://` when the
/// scheme is missing.
pub fn normalize_input_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SiteProfilerError::validation("empty URL"));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| SiteProfilerError::validation(format!("invalid URL {candidate:?}: {e}")))?;
    if url.host_str().is_none() {
        return Err(SiteProfilerError::validation(format!(
            "URL {candidate:?} has no host"
        )));
    }
    Ok(url)
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// HTTP fetcher for company pages.
pub struct PageFetcher {
    client: Client,
    main_timeout: Duration,
    aux_timeout: Duration,
    /// Allow localhost/private IPs (for integration tests with mock servers).
    allow_localhost: bool,
}

impl PageFetcher {
    /// Create a fetcher using the run's timeouts.
    pub fn new(config: &ProfileConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| {
                SiteProfilerError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            main_timeout: Duration::from_secs(config.timeout_secs),
            aux_timeout: Duration::from_secs(config.aux_timeout_secs),
            allow_localhost: false,
        })
    }

    /// Allow fetching localhost/private addresses (for integration tests).
    pub fn allow_localhost(mut self) -> Self {
        self.allow_localhost = true;
        self
    }

    /// Fetch the site's entry page. Any failure here fails the run.
    pub async fn fetch_main(&self, url: &Url) -> Result<String> {
        self.fetch(url, self.main_timeout).await
    }

    /// Fetch an auxiliary page (about/contact/team, bio profiles). Failures
    /// are logged and reported as absence, never propagated.
    pub async fn fetch_aux(&self, url: &Url) -> Option<String> {
        match self.fetch(url, self.aux_timeout).await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(%url, error = %e, "auxiliary page unavailable, skipping");
                None
            }
        }
    }

    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String> {
        if !self.allow_localhost && is_ssrf_target(url) {
            return Err(SiteProfilerError::fetch(
                url.as_str(),
                "blocked private or local address",
            ));
        }

        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SiteProfilerError::fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteProfilerError::fetch(
                url.as_str(),
                format!("HTTP {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| SiteProfilerError::fetch(url.as_str(), format!("body read failed: {e}")))
    }
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Check if a URL targets a potentially dangerous resource.
fn is_ssrf_target(url: &Url) -> bool {
    // Block non-HTTP schemes
    match url.scheme() {
        "http" | "https" => {}
        _ => return true,
    }

    // Block private/loopback IPs
    if let Some(host) = url.host_str() {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return is_private_ip(&ip);
        }
        // Block known local hostnames
        if host == "localhost"
            || host == "127.0.0.1"
            || host == "[::1]"
            || host.ends_with(".local")
            || host.ends_with(".internal")
        {
            return true;
        }
    }

    false
}

/// Check if an IP is in a private/reserved range.
fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_unspecified()
                // 100.64.0.0/10 (Carrier-grade NAT)
                || (v4.octets()[0] == 100 && (v4.octets()[1] & 0xC0) == 64)
                // 192.0.0.0/24
                || (v4.octets()[0] == 192 && v4.octets()[1] == 0 && v4.octets()[2] == 0)
        }
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_https_scheme() {
        let url = normalize_input_url("acme.example").unwrap();
        assert_eq!(url.as_str(), "https://acme.example/");

        let url = normalize_input_url("  acme.example/about  ").unwrap();
        assert_eq!(url.as_str(), "https://acme.example/about");
    }

    #[test]
    fn normalize_keeps_existing_scheme() {
        let url = normalize_input_url("http://acme.example").unwrap();
        assert_eq!(url.scheme(), "http");

        let url = normalize_input_url("HTTPS://acme.example").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(normalize_input_url("").is_err());
        assert!(normalize_input_url("   ").is_err());
        assert!(normalize_input_url("https://").is_err());
    }

    #[test]
    fn ssrf_blocks_file_scheme() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        assert!(is_ssrf_target(&url));
    }

    #[test]
    fn ssrf_blocks_private_ranges() {
        for input in [
            "http://192.168.1.1/admin",
            "http://10.0.0.1/",
            "http://127.0.0.1:8080/",
            "http://100.64.0.1/",
            "http://localhost:3000/api",
            "http://internal.corp.local/",
        ] {
            let url = Url::parse(input).unwrap();
            assert!(is_ssrf_target(&url), "{input} should be blocked");
        }
    }

    #[test]
    fn ssrf_allows_public_hosts() {
        let url = Url::parse("https://acme.example/about").unwrap();
        assert!(!is_ssrf_target(&url));
    }

    #[tokio::test]
    async fn fetch_main_returns_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("<html><body>hello</body></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&ProfileConfig::default())
            .unwrap()
            .allow_localhost();
        let url = Url::parse(&server.uri()).unwrap();
        let body = fetcher.fetch_main(&url).await.unwrap();
        assert!(body.contains("hello"));
    }

    #[tokio::test]
    async fn fetch_main_fails_on_http_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&ProfileConfig::default())
            .unwrap()
            .allow_localhost();
        let url = Url::parse(&server.uri()).unwrap();
        let err = fetcher.fetch_main(&url).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn fetch_aux_swallows_failures() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/team"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&ProfileConfig::default())
            .unwrap()
            .allow_localhost();
        let url = Url::parse(&format!("{}/team", server.uri())).unwrap();
        assert!(fetcher.fetch_aux(&url).await.is_none());
    }

    #[tokio::test]
    async fn loopback_blocked_without_override() {
        let server = wiremock::MockServer::start().await;
        let fetcher = PageFetcher::new(&ProfileConfig::default()).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = fetcher.fetch_main(&url).await.unwrap_err();
        assert!(err.to_string().contains("blocked"));
    }
}

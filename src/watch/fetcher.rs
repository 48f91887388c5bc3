//! HTTP fetching for tracked links.
//!
//! [`Fetch`] is the seam the rest of the core depends on; [`HttpFetcher`]
//! is the reqwest-backed implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::FetchConfig;
use crate::{LinkwatchError, Result};

/// A successfully fetched response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the page was requested from.
    pub url: String,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Create a page from a URL and body.
    pub fn new(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Capability to GET a URL.
pub trait Fetch {
    /// Fetch `url`. Non-success statuses are errors.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage>>;
}

/// HTTP fetcher built on reqwest.
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    /// Create a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str());
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LinkwatchError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        validate_url(url)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LinkwatchError::Fetch(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LinkwatchError::Fetch(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_body_bytes {
                return Err(LinkwatchError::Fetch(format!(
                    "response too large: {} bytes (max {} bytes)",
                    content_length, self.max_body_bytes
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LinkwatchError::Fetch(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > self.max_body_bytes {
            return Err(LinkwatchError::Fetch(format!(
                "response too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_body_bytes
            )));
        }

        Ok(FetchedPage::new(url, bytes.to_vec()))
    }
}

/// Check that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| LinkwatchError::Fetch(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(LinkwatchError::Fetch(format!(
                "unsupported URL scheme: {}",
                scheme
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(LinkwatchError::Fetch("URL has no host".to_string()));
    }

    Ok(())
}

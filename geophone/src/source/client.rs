//! HTTP client for the geocoding source file.

use tracing::debug;

use super::error::SourceError;

/// Default source: libphonenumber's English geocoding data for country code 1.
const DEFAULT_URL: &str = "https://raw.githubusercontent.com/google/libphonenumber/master/resources/geocoding/en/1.txt";

/// Configuration for the source client.
#[derive(Debug, Clone)]
pub struct SourceClientConfig {
    /// URL of the `<digits>|<location>` text file
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SourceClientConfig {
    /// Create a config pointing at the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for SourceClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// Fetches the raw source text.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    url: String,
}

impl SourceClient {
    /// Create a new source client.
    pub fn new(config: SourceClientConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the source file as text.
    pub async fn fetch_text(&self) -> Result<String, SourceError> {
        debug!(url = %self.url, "fetching prefix source");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

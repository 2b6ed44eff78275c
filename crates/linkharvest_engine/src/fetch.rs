use std::error::Error as StdError;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use harvest_logging::{harvest_debug, harvest_info};
use linkharvest_core::FetchedPage;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::decode::decode_body;
use crate::sanitize::strip_scripts_and_styles;
use crate::{FailureKind, FetchError};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Given a URL, returns the page's HTML with scripts and styles removed.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    clock: Clock,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            settings,
            clock: Arc::new(|| chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Replaces the timestamp source, e.g. to pin it in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, format!("Failed to fetch URL: {err}")))
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            return FetchError::new(
                FailureKind::Timeout,
                format!(
                    "Request timed out after {}s",
                    self.settings.request_timeout.as_secs()
                ),
            );
        }
        if err.is_connect() {
            if find_io_error(&err).is_some_and(|io| io.kind() == io::ErrorKind::ConnectionRefused) {
                return FetchError::new(
                    FailureKind::ConnectionRefused,
                    "Unable to connect to the server",
                );
            }
            if is_dns_failure(&err) {
                return FetchError::new(FailureKind::HostNotFound, "Domain not found");
            }
        }
        FetchError::new(FailureKind::Network, format!("Failed to fetch URL: {err}"))
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = reqwest::Url::parse(url.trim())
            .ok()
            .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, "Invalid URL format"))?;

        harvest_info!("Fetching listing page {}", parsed);
        let client = self.build_client()?;
        let response = client
            .get(parsed)
            .header(USER_AGENT, &self.settings.user_agent)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_body(&bytes, content_type.as_deref());
        harvest_debug!(
            "Fetched {} bytes from {} ({})",
            bytes.len(),
            final_url,
            decoded.encoding_label
        );

        Ok(FetchedPage {
            html: strip_scripts_and_styles(&decoded.text),
            url: final_url,
            fetched_utc: (self.clock)(),
        })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        format!("Response too large ({actual} bytes, limit {max_bytes})"),
    )
}

fn find_io_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a io::Error> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            return Some(io_err);
        }
        current = err.source();
    }
    None
}

fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        let text = err.to_string().to_ascii_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup")
            || text.contains("name or service not known")
            || text.contains("no such host")
        {
            return true;
        }
        current = err.source();
    }
    false
}

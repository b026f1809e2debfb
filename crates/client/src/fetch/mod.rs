//! HTTP clients for the two outbound paths.
//!
//! ### Reader fetch
//! - Prefix the target URL with the reader proxy base and issue one GET.
//! - Fixed timeout (default 30s); transport errors propagate.
//! - No status check: a non-2xx body is returned verbatim to the caller.
//!
//! ### Direct download
//! - Plain GET against the target URL (no proxy), used to populate the cache.
//! - Non-2xx status is an error; no timeout is imposed on this path.

use bytes::Bytes;
use reqwest::Client;
use std::time::{Duration, Instant};

use sourcetap_core::Error;

/// Configuration for the HTTP clients.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "sourcetap/0.1")
    pub user_agent: String,

    /// Base URL of the reader proxy; the target URL is appended verbatim.
    pub reader_base_url: String,

    /// Reader request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "sourcetap/0.1".to_string(),
            reader_base_url: "https://r.jina.ai/".to_string(),
            timeout: Duration::from_millis(30000),
        }
    }
}

/// Client for fetching rendered page content through the reader proxy.
pub struct ReaderClient {
    http: Client,
    config: FetchConfig,
}

impl ReaderClient {
    /// Create a new reader client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// The proxied URL a target URL resolves to.
    pub fn reader_url(&self, url: &str) -> String {
        format!("{}{}", self.config.reader_base_url, url)
    }

    /// Fetch the rendered content of `url` through the reader proxy.
    ///
    /// Returns the response body verbatim. The status code is not inspected;
    /// an error page from the proxy is indistinguishable from real content.
    pub async fn fetch(&self, url: &str) -> Result<String, Error> {
        let start = Instant::now();
        let reader_url = self.reader_url(url);

        let response = self
            .http
            .get(&reader_url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("network error: {}", e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("failed to read response: {}", e)))?;

        tracing::debug!(
            "fetched {} in {}ms ({} chars)",
            reader_url,
            start.elapsed().as_millis(),
            text.len()
        );

        Ok(text)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

/// Direct download transport, used by the cache-miss path.
///
/// Behind a trait so the cache glue can be exercised with a mock transport.
#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    /// GET `url` and return the body bytes; non-2xx status is an error.
    async fn download(&self, url: &str) -> Result<Bytes, Error>;
}

/// reqwest-backed direct download client.
pub struct DownloadClient {
    http: Client,
}

impl DownloadClient {
    /// Create a new download client.
    ///
    /// No timeout is set on this client; cache-populating downloads of
    /// large archives are allowed to take as long as they need.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Downloader for DownloadClient {
    async fn download(&self, url: &str) -> Result<Bytes, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("failed to read response: {}", e)))?;

        tracing::debug!(
            "downloaded {} in {}ms ({} bytes)",
            url,
            start.elapsed().as_millis(),
            bytes.len()
        );

        Ok(bytes)
    }
}

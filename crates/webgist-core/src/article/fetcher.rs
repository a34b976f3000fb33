use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use url::Url;

use super::extract::{extract_title, html_to_text};
use super::models::Article;
use crate::config::AppConfig;
use crate::{Error, Result};

const INITIAL_RETRY_DELAY_MS: u64 = 500;

// Rotating User-Agent pool - some article hosts reject unknown clients
static USER_AGENT_INDEX: AtomicUsize = AtomicUsize::new(0);
const USER_AGENTS: &[&str] = &[
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Get the next User-Agent in rotation
fn next_user_agent() -> &'static str {
    let index = USER_AGENT_INDEX.fetch_add(1, Ordering::Relaxed) % USER_AGENTS.len();
    USER_AGENTS[index]
}

/// Capability seam for article retrieval.
///
/// A fetch error is reported distinctly from a successful fetch whose page
/// simply had no readable body; callers decide what an empty body means.
#[async_trait::async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Article>;
}

/// HTTP article fetcher with readable-text extraction
pub struct HttpArticleFetcher {
    client: Client,
    max_retries: u32,
    max_article_bytes: usize,
}

impl HttpArticleFetcher {
    /// Create a new fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.fetch.request_timeout_secs)?;

        Ok(Self {
            client,
            max_retries: config.fetch.max_retries.max(1),
            max_article_bytes: config.fetch.max_article_bytes,
        })
    }

    fn build_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)
    }

    /// Build browser-like headers for a request
    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        if let Ok(ua) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers
    }

    /// Fetch with retry and exponential backoff on 429/503
    async fn fetch_with_retry(&self, url: &str) -> Result<Bytes> {
        let mut last_error = None;
        let mut delay_ms = INITIAL_RETRY_DELAY_MS;

        for attempt in 0..self.max_retries {
            let headers = Self::build_headers(next_user_agent());

            tracing::debug!("Fetch attempt {} for {}", attempt + 1, url);

            match self.client.get(url).headers(headers).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                        || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
                    {
                        tracing::warn!(
                            "Received {} for {}, retrying after {}ms...",
                            status,
                            url,
                            delay_ms
                        );
                        last_error =
                            Some(Error::Fetch(format!("HTTP {} for URL: {}", status, url)));
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms *= 2;
                        continue;
                    }

                    if !status.is_success() {
                        return Err(Error::Fetch(format!("HTTP {} for URL: {}", status, url)));
                    }

                    match response.bytes().await {
                        Ok(bytes) => {
                            self.ensure_content_size(bytes.len(), url)?;
                            return Ok(bytes);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to read response body: {}", e);
                            last_error = Some(Error::Http(e));
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Request failed for {} (attempt {}): {}", url, attempt + 1, e);
                    last_error = Some(Error::Http(e));
                }
            }

            if attempt < self.max_retries - 1 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Fetch(format!(
                "Failed to fetch URL after {} attempts: {}",
                self.max_retries, url
            ))
        }))
    }

    fn ensure_content_size(&self, size: usize, url: &str) -> Result<()> {
        if size > self.max_article_bytes {
            return Err(Error::Fetch(format!(
                "Article too large ({} bytes) for URL: {}",
                size, url
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str) -> Result<Article> {
        // Validate before issuing the request
        Url::parse(url)?;

        tracing::info!("Fetching article from: {}", url);

        let content = self.fetch_with_retry(url).await?;
        let html = String::from_utf8_lossy(&content);

        let title = extract_title(&html).unwrap_or_else(|| "Untitled".to_string());
        let body = html_to_text(&html);

        Ok(Article {
            title,
            body,
        })
    }
}

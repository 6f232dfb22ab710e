//! Page retrieval for lookup keys.
//!
//! The extractor never touches the network; a [`PageFetcher`] resolves a
//! lookup key to raw markup first. [`WiktionaryFetcher`] does so over HTTP
//! with a minimum delay between requests and bounded retries.

use crate::error::{Result, WiktError};
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const DEFAULT_BASE_URL: &str = "https://en.wiktionary.org/wiki/";
pub const DEFAULT_USER_AGENT: &str = "wikt_rs/0.1 (Dictionary Data Collection)";

/// Marker text served with a 200 status for pages that do not exist.
const MISSING_ENTRY_MARKER: &str = "Wiktionary does not have an entry for this term";

/// Result of fetching one lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(String),
    NotFound,
    TransientFailure(String),
}

pub trait PageFetcher {
    fn fetch(&self, key: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Options for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub base_url: String,
    pub user_agent: String,
    /// Minimum delay between the start of two requests.
    pub rate_limit: Duration,
    pub timeout: Duration,
    /// Extra attempts after the first one for retryable failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

pub struct WiktionaryFetcher {
    client: reqwest::Client,
    options: FetchOptions,
    last_request: Mutex<Option<Instant>>,
}

impl WiktionaryFetcher {
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()?;
        Ok(WiktionaryFetcher {
            client,
            options,
            last_request: Mutex::new(None),
        })
    }

    /// The page URL for `key`; spaces become underscores, the rest is
    /// percent-encoded as one path segment.
    pub fn page_url(&self, key: &str) -> Result<Url> {
        page_url(&self.options.base_url, key)
    }

    /// Waits until `rate_limit` has passed since the previous request.
    async fn wait_for_slot(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.options.rate_limit {
                tokio::time::sleep(self.options.rate_limit - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch_once(&self, url: &Url) -> Attempt {
        self.wait_for_slot().await;
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(format!("request failed: {}", e)),
        };
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Attempt::Done(FetchOutcome::NotFound);
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Attempt::Retry(format!("HTTP {}", status));
        }
        if !status.is_success() {
            return Attempt::Done(FetchOutcome::TransientFailure(format!("HTTP {}", status)));
        }
        match response.text().await {
            Ok(body) if is_missing_entry_page(&body) => Attempt::Done(FetchOutcome::NotFound),
            Ok(body) => Attempt::Done(FetchOutcome::Found(body)),
            Err(e) => Attempt::Retry(format!("reading body failed: {}", e)),
        }
    }
}

enum Attempt {
    Done(FetchOutcome),
    Retry(String),
}

impl PageFetcher for WiktionaryFetcher {
    async fn fetch(&self, key: &str) -> FetchOutcome {
        let url = match self.page_url(key) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::TransientFailure(e.to_string()),
        };
        let mut delay = self.options.retry_delay;
        let mut last_error = String::new();

        for attempt in 0..=self.options.max_retries {
            if attempt > 0 {
                debug!("Retrying '{}' in {:?} (attempt {})", key, delay, attempt + 1);
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            match self.fetch_once(&url).await {
                Attempt::Done(outcome) => {
                    if outcome == FetchOutcome::NotFound {
                        info!("No entry found for '{}'", key);
                    }
                    return outcome;
                }
                Attempt::Retry(reason) => {
                    warn!("Fetching '{}' failed: {}", key, reason);
                    last_error = reason;
                }
            }
        }
        FetchOutcome::TransientFailure(last_error)
    }
}

pub fn page_url(base_url: &str, key: &str) -> Result<Url> {
    if key.trim().is_empty() {
        return Err(WiktError::InvalidArgument("empty lookup key".to_string()));
    }
    let mut url = Url::parse(base_url)
        .map_err(|e| WiktError::InvalidArgument(format!("bad base URL {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| WiktError::InvalidArgument(format!("base URL {} cannot hold a path", base_url)))?
        .pop_if_empty()
        .push(&key.trim().replace(' ', "_"));
    Ok(url)
}

pub fn is_missing_entry_page(body: &str) -> bool {
    body.contains(MISSING_ENTRY_MARKER)
}

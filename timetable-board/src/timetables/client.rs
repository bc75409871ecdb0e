//! Timetables API HTTP client.
//!
//! Provides async methods for fetching planned-schedule and change documents.
//! Handles authentication, concurrency limiting, and XML intake.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::document::TreeNode;
use crate::domain::{HourBucket, StationId};

use super::error::FeedError;
use super::fetcher::FeedFetcher;

/// Default base URL for the timetables API.
const DEFAULT_BASE_URL: &str =
    "https://apis.deutschebahn.com/db-api-marketplace/apis/timetables/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// How much of an unparsable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the timetables client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Client id, sent as `DB-Client-Id`
    pub client_id: String,
    /// API key, sent as `DB-Api-Key`
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config with the given credentials.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Timetables API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TimetablesClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TimetablesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        let client_id = HeaderValue::from_str(&config.client_id)
            .map_err(|_| FeedError::NotConfigured("invalid client id format".to_string()))?;
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| FeedError::NotConfigured("invalid API key format".to_string()))?;

        headers.insert(HeaderName::from_static("db-client-id"), client_id);
        headers.insert(HeaderName::from_static("db-api-key"), api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL of one planned-schedule hour.
    pub fn plan_url(&self, station: &StationId, bucket: HourBucket) -> String {
        format!(
            "{}/plan/{}/{}/{}",
            self.base_url,
            station.as_str(),
            bucket.date_code(),
            bucket.hour_code()
        )
    }

    /// URL of the full change document.
    pub fn changes_url(&self, station: &StationId) -> String {
        format!("{}/fchg/{}", self.base_url, station.as_str())
    }

    /// Fetch a URL and parse the body as an XML document.
    async fn get_document(&self, url: &str) -> Result<TreeNode, FeedError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FeedError::NotConfigured("request semaphore closed".to_string()))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        debug!(url, status = status.as_u16(), "Fetched timetable document");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FeedError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FeedError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        TreeNode::parse_xml(&body).map_err(|e| FeedError::Xml {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        })
    }
}

impl FeedFetcher for TimetablesClient {
    async fn fetch_plan(
        &self,
        station: &StationId,
        bucket: HourBucket,
    ) -> Result<TreeNode, FeedError> {
        self.get_document(&self.plan_url(station, bucket)).await
    }

    async fn fetch_changes(&self, station: &StationId) -> Result<TreeNode, FeedError> {
        self.get_document(&self.changes_url(station)).await
    }
}

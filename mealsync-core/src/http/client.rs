//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::FetchError;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the response body as text.
    ///
    /// Non-success statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for ReqwestClient.
#[derive(Clone)]
pub struct ReqwestClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("mealsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ReqwestClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ReqwestClient { inner })
    }
}

/// Production HTTP client.
#[derive(Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        ReqwestClientBuilder::new().build()
    }

    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        tracing::debug!(url, "network: fetching");
        let response = self.inner.get(parsed).send().await?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "network: request failed");
        }
        let response = response.error_for_status()?;

        Ok(response.text().await?)
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Body(String),
    Error(String),
}

/// Mock HTTP client for testing.
///
/// Every requested URL is recorded, in order, so tests can assert on the
/// sequence of calls.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    fallback: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a body for a URL.
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    /// Add an error response for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }

    /// Body returned for any URL without a registered response.
    pub fn with_fallback(mut self, body: &str) -> Self {
        self.fallback = Some(body.to_string());
        self
    }

    /// URLs requested so far, oldest first.
    ///
    /// Panics if a request panicked while holding the log.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests
            .lock()
            .map_err(|_| FetchError::Transport("mock request log poisoned".to_string()))?
            .push(url.to_string());

        match (self.responses.get(url), &self.fallback) {
            (Some(MockResponse::Body(body)), _) => Ok(body.clone()),
            (Some(MockResponse::Error(e)), _) => Err(FetchError::Transport(e.clone())),
            (None, Some(body)) => Ok(body.clone()),
            (None, None) => Err(FetchError::Transport(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}

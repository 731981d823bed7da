//! REST client implementation
//!
//! This module implements requests against the backend's PostgREST surface
//! (`<base>/rpc/<function>` and table paths). It provides request/response
//! types, the error taxonomy, and the core HTTP client with retry logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::environment::{Environment, NetworkEnvironmentUrl};

// =============================================================================
// Error Types
// =============================================================================

/// Request failure
///
/// Transport failures, non-success statuses and body shape mismatches are
/// kept apart so callers can decide what to surface.
///
/// # Examples
/// ```
/// use marketplace_client::RequestError;
///
/// let error = RequestError::status(404, "Not found");
/// assert_eq!(error.status_code(), Some(404));
/// assert!(!error.is_network_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// PostgREST error code (e.g. "PGRST202"), when the body carried one
        code: Option<String>,
        /// Error message
        message: String,
    },

    /// Body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client is not configured for the request
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RequestError {
    /// Create a status error without a PostgREST code
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        RequestError::Status {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a network-related error that should be retried
    ///
    /// Transport failures and the statuses 408, 425, 429, 500, 502, 503,
    /// 504, 522, 524.
    pub fn is_network_error(&self) -> bool {
        match self {
            RequestError::Network(_) => true,
            RequestError::Status { status, .. } => {
                matches!(status, 408 | 425 | 429 | 500 | 502 | 503 | 504 | 522 | 524)
            }
            _ => false,
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// REST request
///
/// Path is relative to the configured base URL (e.g. `/rpc/get_colors`).
#[derive(Debug, Clone)]
pub struct RestRequest {
    /// Path below the base URL
    pub path: String,
}

impl RestRequest {
    /// Create a new GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// REST response with headers and decoded data
#[derive(Debug, Clone)]
pub struct RestResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercase names)
    pub headers: HashMap<String, String>,
    /// Response data
    pub data: T,
}

impl<T> RestResponse<T> {
    /// Create a new response
    pub fn new(status: u16, headers: HashMap<String, String>, data: T) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }
}

/// PostgREST error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgrestErrorResponse {
    /// Error code
    #[serde(default)]
    pub code: Option<String>,
    /// Error message
    pub message: String,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL (e.g. "http://127.0.0.1:54321/rest/v1")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers included in all requests
    pub default_headers: HashMap<String, String>,
    /// Retry policy for network-class failures
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::environment::LOCAL_SUPABASE_REST_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Rose-Bedsheet/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            retry: RetryConfig::none(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a config for the base URL of an environment
    pub fn for_environment(
        urls: &NetworkEnvironmentUrl,
        environment: Environment,
    ) -> Result<Self, RequestError> {
        Ok(Self::new(urls.url_for(environment)?))
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Authenticate with a Supabase API key (`apikey` + bearer token)
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.with_header("apikey", api_key.clone())
            .with_header("Authorization", format!("Bearer {api_key}"))
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

// =============================================================================
// Retry Logic with Exponential Backoff
// =============================================================================

use std::future::Future;
use tokio::time::sleep;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: usize,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier (e.g., 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Set the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate the delay for a given retry attempt
    fn calculate_delay(&self, attempt: usize) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);

        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Retry an async operation with a configurable retry policy
///
/// # Examples
/// ```
/// use marketplace_client::rest::{retry, RetryConfig};
/// use marketplace_client::RequestError;
///
/// async fn example() -> Result<String, RequestError> {
///     retry(
///         RetryConfig::new(3),
///         |err: &RequestError| err.is_network_error(),
///         || async { Ok("success".to_string()) },
///     )
///     .await
/// }
/// ```
pub async fn retry<F, Fut, T, E>(
    config: RetryConfig,
    should_retry: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                attempts += 1;

                if !should_retry(&err) || attempts > config.max_retries {
                    return Err(err);
                }

                sleep(config.calculate_delay(attempts - 1)).await;
            }
        }
    }
}

/// Retry network-class failures up to `config.max_retries` times
pub async fn network_retry<F, Fut, T>(config: RetryConfig, operation: F) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    retry(config, |err: &RequestError| err.is_network_error(), operation).await
}

// =============================================================================
// REST Client Implementation
// =============================================================================

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};

/// Client for the backend REST surface
///
/// # Examples
/// ```
/// use marketplace_client::{ClientConfig, RestClient, RestRequest};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::new(ClientConfig::new("http://127.0.0.1:54321/rest/v1"))?;
///
///     let response = client
///         .execute::<serde_json::Value>(RestRequest::get("/rpc/get_colors"))
///         .await?;
///     println!("{}", response.data);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    client: ReqwestClient,
    config: ClientConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(config: ClientConfig) -> Result<Self, RequestError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                RequestError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// GET a path and decode the body
    pub async fn get<T>(&self, path: &str) -> Result<RestResponse<T>, RequestError>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.execute_with_retry(RestRequest::get(path)).await
    }

    /// Execute a request once
    pub async fn execute<T>(&self, request: RestRequest) -> Result<RestResponse<T>, RequestError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.url_for(&request.path);

        let mut req = self.client.get(&url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        tracing::debug!(%url, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| RequestError::Network(format!("Request failed: {e}")))?;

        self.parse_response(response).await
    }

    /// Execute a request, retrying per the configured policy
    pub async fn execute_with_retry<T>(
        &self,
        request: RestRequest,
    ) -> Result<RestResponse<T>, RequestError>
    where
        T: for<'de> Deserialize<'de>,
    {
        network_retry(self.config.retry.clone(), || {
            let request = request.clone();
            async move {
                let result = self.execute(request).await;
                if let Err(err) = &result {
                    if err.is_network_error() {
                        tracing::warn!(error = %err, "request failed with retryable error");
                    }
                }
                result
            }
        })
        .await
    }

    async fn parse_response<T>(
        &self,
        response: ReqwestResponse,
    ) -> Result<RestResponse<T>, RequestError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();

            return Err(match serde_json::from_str::<PostgrestErrorResponse>(&error_body) {
                Ok(error_response) => RequestError::Status {
                    status,
                    code: error_response.code,
                    message: error_response.message,
                },
                Err(_) => RequestError::status(status, format!("HTTP {status}: {error_body}")),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Network(format!("Failed to read response: {e}")))?;

        let data: T = serde_json::from_str(&body)
            .map_err(|e| RequestError::Decode(format!("Failed to parse JSON: {e}")))?;

        Ok(RestResponse::new(status, headers, data))
    }

    fn url_for(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod retry_tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_retry_success_after_retries() {
        let config = RetryConfig::new(3).with_initial_delay(Duration::from_millis(10));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let result = retry(
            config,
            |_: &String| true,
            || {
                let c = counter_clone.clone();
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err("temporary error".to_string())
                    } else {
                        Ok("success")
                    }
                }
            },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhausted() {
        let config = RetryConfig::new(2).with_initial_delay(Duration::from_millis(10));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let result = retry(
            config,
            |_: &String| true,
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<String, _>("always fails".to_string())
                }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3); // Initial + 2 retries
    }

    #[tokio::test]
    async fn test_no_retry_when_disabled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), RequestError> = network_retry(RetryConfig::none(), || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(RequestError::status(503, "down"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_network_retry_skips_application_errors() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), RequestError> = network_retry(RetryConfig::new(2), || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(RequestError::Decode("bad shape".to_string()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_config_calculate_delay() {
        let config = RetryConfig::new(3)
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0)
            .with_max_delay(Duration::from_secs(5));

        assert_eq!(config.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(config.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(config.calculate_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_retry_config_max_delay() {
        let config = RetryConfig::new(10)
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(1));

        assert_eq!(config.calculate_delay(10), Duration::from_secs(1));
    }
}

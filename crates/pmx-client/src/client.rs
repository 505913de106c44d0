//! Platform REST API transport.
//!
//! Typed HTTP client with:
//! - API-token authentication
//! - Response envelope decoding
//! - HTTP status error mapping
//! - Exponential backoff with jitter for idempotent reads

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::debug;
use url::Url;

use crate::error::{PmxError, PmxResult};
use crate::node::Node;
use crate::retry::{with_retry, RetryConfig};
use crate::sdn::Cluster;

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration.
#[derive(Debug, Clone)]
pub struct PmxConfig {
    /// Base URL of the API endpoint, e.g. `https://pve.example.com:8006/api2/json`
    pub base_url: String,
    /// API token id (`user@realm!tokenname`)
    pub token_id: String,
    /// API token secret
    pub token_secret: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification; clusters commonly run on
    /// self-signed certificates
    pub insecure_tls: bool,
    /// Retry configuration for idempotent reads
    pub retry: RetryConfig,
}

impl PmxConfig {
    /// Create a config with default timeouts and retry policy.
    pub fn new(
        base_url: impl Into<String>,
        token_id: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token_id: token_id.into(),
            token_secret: token_secret.into(),
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(5),
            insecure_tls: false,
            retry: RetryConfig::default(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> PmxResult<Self> {
        let base_url = std::env::var("PMX_API_URL")
            .map_err(|_| PmxError::config("PMX_API_URL must be set"))?;
        if base_url.is_empty() {
            return Err(PmxError::config("PMX_API_URL cannot be empty"));
        }

        let token_id = std::env::var("PMX_TOKEN_ID")
            .map_err(|_| PmxError::config("PMX_TOKEN_ID must be set"))?;
        let token_secret = std::env::var("PMX_TOKEN_SECRET")
            .map_err(|_| PmxError::config("PMX_TOKEN_SECRET must be set"))?;

        let timeout_secs: u64 = std::env::var("PMX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(300);
        let connect_timeout_secs: u64 = std::env::var("PMX_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let insecure_tls = std::env::var("PMX_INSECURE_TLS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            base_url,
            token_id,
            token_secret,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            insecure_tls,
            retry: RetryConfig::from_env(),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// The platform's standard response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
}

/// Typed client for the platform REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct PmxClient {
    http: Client,
    base_url: String,
    auth: String,
    retry: RetryConfig,
}

impl PmxClient {
    /// Create a new client.
    pub fn new(config: PmxConfig) -> PmxResult<Self> {
        let url = Url::parse(&config.base_url)
            .map_err(|e| PmxError::config(format!("invalid base url {}: {}", config.base_url, e)))?;

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("pmx-client/", env!("CARGO_PKG_VERSION")));
        if config.insecure_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().map_err(PmxError::Network)?;

        Ok(Self {
            http,
            base_url: url.as_str().trim_end_matches('/').to_string(),
            auth: format!("PVEAPIToken={}={}", config.token_id, config.token_secret),
            retry: config.retry,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> PmxResult<Self> {
        Self::new(PmxConfig::from_env()?)
    }

    /// Entry point for cluster-level calls.
    pub fn cluster(&self) -> Cluster {
        Cluster::new(self.clone())
    }

    /// Entry point for node-level calls.
    pub fn node(&self, name: impl Into<String>) -> Node {
        Node::new(self.clone(), name)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, self.auth.as_str())
    }

    /// Unwrap a response: map error statuses, then decode the `data`
    /// envelope the platform wraps every payload in.
    async fn read_data<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> PmxResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, url, response).await);
        }

        let envelope: ApiResponse<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| PmxError::invalid_response(format!("{} returned no data", url)))
    }

    async fn error_from_response(
        status: StatusCode,
        url: &str,
        response: reqwest::Response,
    ) -> PmxError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return PmxError::RateLimited(retry_after.map(|secs| secs * 1000).unwrap_or(1000));
        }
        PmxError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body))
    }

    /// GET a path and decode the `data` payload. Idempotent, retried.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PmxResult<T> {
        let url = self.build_url(path);
        with_retry(&self.retry, path, || async {
            debug!("GET {}", url);
            let response = self.apply_auth(self.http.get(&url)).send().await?;
            Self::read_data(&url, response).await
        })
        .await
    }

    /// POST form fields and decode the `data` payload. Not retried.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> PmxResult<T> {
        let url = self.build_url(path);
        debug!("POST {}", url);
        let response = self
            .apply_auth(self.http.post(&url))
            .form(form)
            .send()
            .await?;
        Self::read_data(&url, response).await
    }

    /// DELETE a path and decode the `data` payload. Not retried.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> PmxResult<T> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);
        let response = self.apply_auth(self.http.delete(&url)).send().await?;
        Self::read_data(&url, response).await
    }

    /// POST a multipart upload: text parts for `fields`, a streamed part for
    /// `file`. Not retried, the stream is consumed by the attempt.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
        file: tokio::fs::File,
        file_name: &str,
    ) -> PmxResult<T> {
        let url = self.build_url(path);
        debug!("POST {} (multipart, {})", url, file_name);

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in fields {
            form = form.text((*key).to_string(), value.clone());
        }
        let part = reqwest::multipart::Part::stream(reqwest::Body::wrap_stream(
            ReaderStream::new(file),
        ))
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")?;
        form = form.part("filename", part);

        let response = self
            .apply_auth(self.http.post(&url))
            .multipart(form)
            .send()
            .await?;
        Self::read_data(&url, response).await
    }
}

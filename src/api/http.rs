//! HTTP Transport
//!
//! reqwest-backed [`Transport`] for native builds. The browser-only parts of
//! the fetch policy (`mode`, `credentials`) have no native counterpart; the
//! rest map onto headers and client settings.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::{redirect, Client};
use serde_json::Value;
use std::time::Duration;

use super::client::{ApiResponse, Transport};
use super::error::{ApiError, ApiResult};
use super::request::{Redirect, ReferrerPolicy, RequestPolicy};

/// Maximum redirects followed, matching the fetch standard
const MAX_REDIRECTS: usize = 20;

/// Native HTTP transport bound to a backend origin
pub struct HttpTransport {
    client: Client,
    origin: String,
    policy: RequestPolicy,
}

impl HttpTransport {
    /// Create a transport for `origin` (e.g. `http://localhost:5000`)
    pub fn new(origin: &str, timeout: Duration, policy: RequestPolicy) -> ApiResult<Self> {
        let redirect_policy = match policy.redirect {
            Redirect::Follow => redirect::Policy::limited(MAX_REDIRECTS),
            Redirect::Error | Redirect::Manual => redirect::Policy::none(),
        };

        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect_policy)
            .referer(policy.referrer_policy != ReferrerPolicy::NoReferrer)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// Transport configured from the `[api]` section
    pub fn from_config(config: &crate::config::ApiConfig) -> ApiResult<Self> {
        Self::new(
            &config.url,
            Duration::from_secs(config.request_timeout_secs),
            RequestPolicy::default(),
        )
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for a destination; absolute destinations pass through
    pub fn url(&self, dest: &str) -> String {
        if dest.starts_with("http://") || dest.starts_with("https://") {
            dest.to_string()
        } else if dest.starts_with('/') {
            format!("{}{}", self.origin, dest)
        } else {
            format!("{}/{}", self.origin, dest)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, dest: &str, body: &Value) -> ApiResult<ApiResponse> {
        let url = self.url(dest);
        let request_id = uuid::Uuid::new_v4();

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, self.policy.content_type)
            .body(body.to_string());

        if let Some(cache_control) = self.policy.cache.cache_control() {
            request = request
                .header(CACHE_CONTROL, cache_control)
                .header(PRAGMA, "no-cache");
        }

        tracing::debug!(request_id = %request_id, url = %url, "POST");

        let response = request.send().await.map_err(|e| {
            tracing::debug!(request_id = %request_id, error = %e, "Request failed");
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(request_id = %request_id, status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

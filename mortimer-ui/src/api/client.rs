//! HTTP API Client
//!
//! Browser fetch transport for the Mortimer backend. Request building,
//! envelopes and decoding come from the core `ApiClient`; this module only
//! moves bytes with the fixed fetch policy.

#[cfg(target_arch = "wasm32")]
use gloo_net::http::Request;
use mortimer::api::{
    ApiClient, ApiError, ApiResponse, ApiResult, CacheMode, Credentials, Redirect,
    ReferrerPolicy, RequestMode, RequestPolicy, Transport, DEFAULT_ENDPOINT,
};
use serde_json::Value;

/// Endpoint requests are posted to, fixed at build time
pub fn endpoint() -> &'static str {
    option_env!("MORTIMER_API_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}

/// Client for the backend, bound to [`endpoint`]
pub fn client() -> ApiClient<FetchTransport> {
    ApiClient::new(FetchTransport::default()).with_endpoint(endpoint())
}

/// `fetch`-based transport
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    policy: RequestPolicy,
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post(&self, dest: &str, body: &Value) -> ApiResult<ApiResponse> {
        let policy = &self.policy;

        let response = Request::post(dest)
            .header("Content-Type", policy.content_type)
            .mode(request_mode(policy.mode))
            .cache(request_cache(policy.cache))
            .credentials(request_credentials(policy.credentials))
            .redirect(request_redirect(policy.redirect))
            .referrer_policy(referrer_policy(policy.referrer_policy))
            .body(body.to_string())
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

// Host builds (unit tests) have no fetch
#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl Transport for FetchTransport {
    async fn post(&self, dest: &str, _body: &Value) -> ApiResult<ApiResponse> {
        Err(ApiError::Network(format!(
            "fetch is unavailable outside the browser: {dest}"
        )))
    }
}

fn request_mode(mode: RequestMode) -> web_sys::RequestMode {
    match mode {
        RequestMode::Cors => web_sys::RequestMode::Cors,
        RequestMode::SameOrigin => web_sys::RequestMode::SameOrigin,
        RequestMode::NoCors => web_sys::RequestMode::NoCors,
    }
}

fn request_cache(cache: CacheMode) -> web_sys::RequestCache {
    match cache {
        CacheMode::Default => web_sys::RequestCache::Default,
        CacheMode::NoStore => web_sys::RequestCache::NoStore,
        CacheMode::NoCache => web_sys::RequestCache::NoCache,
        CacheMode::Reload => web_sys::RequestCache::Reload,
    }
}

fn request_credentials(credentials: Credentials) -> web_sys::RequestCredentials {
    match credentials {
        Credentials::Omit => web_sys::RequestCredentials::Omit,
        Credentials::SameOrigin => web_sys::RequestCredentials::SameOrigin,
        Credentials::Include => web_sys::RequestCredentials::Include,
    }
}

fn request_redirect(redirect: Redirect) -> web_sys::RequestRedirect {
    match redirect {
        Redirect::Follow => web_sys::RequestRedirect::Follow,
        Redirect::Error => web_sys::RequestRedirect::Error,
        Redirect::Manual => web_sys::RequestRedirect::Manual,
    }
}

fn referrer_policy(policy: ReferrerPolicy) -> web_sys::ReferrerPolicy {
    match policy {
        ReferrerPolicy::NoReferrer => web_sys::ReferrerPolicy::NoReferrer,
        ReferrerPolicy::StrictOriginWhenCrossOrigin => {
            web_sys::ReferrerPolicy::StrictOriginWhenCrossOrigin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        if option_env!("MORTIMER_API_ENDPOINT").is_none() {
            assert_eq!(endpoint(), "/mortimer/api");
        }
        assert_eq!(client().endpoint(), endpoint());
    }

    #[test]
    fn test_policy_mapping() {
        let policy = RequestPolicy::default();
        assert_eq!(request_mode(policy.mode), web_sys::RequestMode::Cors);
        assert_eq!(request_cache(policy.cache), web_sys::RequestCache::NoCache);
        assert_eq!(
            request_credentials(policy.credentials),
            web_sys::RequestCredentials::SameOrigin
        );
        assert_eq!(request_redirect(policy.redirect), web_sys::RequestRedirect::Follow);
        assert_eq!(
            referrer_policy(policy.referrer_policy),
            web_sys::ReferrerPolicy::NoReferrer
        );
    }
}

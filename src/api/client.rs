//! Mortimer API Client
//!
//! Typed wrapper over a [`Transport`]. Each backend action gets one method;
//! `send_request` is the raw escape hatch for arbitrary bodies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::error::{ApiError, ApiResult};
use super::request::{ApiRequest, DEFAULT_ENDPOINT};

/// Raw response from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success response into [`ApiError::Status`]
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                message: self.body,
            })
        }
    }

    /// Decode the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends one JSON POST and returns the raw response.
///
/// Implementations apply the fetch policy they were built with. Browser
/// futures are not `Send`, so the bound is dropped on wasm32.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    async fn post(&self, dest: &str, body: &Value) -> ApiResult<ApiResponse>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, dest: &str, body: &Value) -> ApiResult<ApiResponse> {
        (**self).post(dest, body).await
    }
}

/// `{"image_paths": [...]}`
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImagePathsResponse {
    #[serde(default)]
    image_paths: Vec<String>,
}

/// Extract the `sessions` field from a `get_sessions` response body.
///
/// The value is returned verbatim; its shape is not checked.
pub fn decode_sessions(body: &str) -> ApiResult<Value> {
    let mut value: Value = serde_json::from_str(body)?;
    value
        .as_object_mut()
        .and_then(|obj| obj.remove("sessions"))
        .ok_or(ApiError::MissingField("sessions"))
}

/// Client for the Mortimer backend
pub struct ApiClient<T> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> ApiClient<T> {
    /// Client posting to the default `/mortimer/api` endpoint
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint used when no per-call destination is given
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `body` as JSON to `dest`, or to the client's endpoint when
    /// `dest` is `None`
    pub async fn send_request<B: Serialize + ?Sized>(
        &self,
        body: &B,
        dest: Option<&str>,
    ) -> ApiResult<ApiResponse> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let dest = dest.unwrap_or(self.endpoint.as_str());
        let action = body.get("action").and_then(Value::as_str).unwrap_or("-");

        tracing::debug!(dest, action, "Sending API request");

        let response = self.transport.post(dest, &body).await?;

        tracing::debug!(dest, status = response.status, "API response");
        Ok(response)
    }

    async fn send_action(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.send_request(request, None).await?.error_for_status()
    }

    /// Fetch the session list and return the `sessions` field
    pub async fn get_sessions(&self) -> ApiResult<Value> {
        let response = self.send_action(&ApiRequest::GetSessions).await?;
        decode_sessions(&response.body)
    }

    /// Aligned preview image paths for one grid of a session directory
    pub async fn check_images(&self, path: &str, grid: &str) -> ApiResult<Vec<String>> {
        let response = self
            .send_action(&ApiRequest::CheckImages {
                path: path.to_string(),
                grid: grid.to_string(),
            })
            .await?;
        let decoded: ImagePathsResponse = response.json()?;
        Ok(decoded.image_paths)
    }

    /// Set the state of a grid
    pub async fn mark_grid(&self, session: &str, grid: &str, state: &str) -> ApiResult<()> {
        self.send_action(&ApiRequest::MarkGrid {
            session: session.to_string(),
            grid: grid.to_string(),
            state: state.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Record that a grid was moved to `location`
    pub async fn move_grid(&self, session: &str, grid: &str, location: &str) -> ApiResult<()> {
        self.send_action(&ApiRequest::MoveGrid {
            session: session.to_string(),
            grid: grid.to_string(),
            location: location.to_string(),
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_decode_sessions_verbatim() {
        assert_eq!(
            decode_sessions(r#"{"sessions": [1, 2, 3]}"#).unwrap(),
            json!([1, 2, 3])
        );
        assert_eq!(
            decode_sessions(r#"{"sessions": {"s1": {"path": "/data/s1"}}, "extra": 1}"#).unwrap(),
            json!({"s1": {"path": "/data/s1"}})
        );
        assert_eq!(decode_sessions(r#"{"sessions": null}"#).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_sessions_failures() {
        assert_eq!(
            decode_sessions(r#"{"other": 1}"#),
            Err(ApiError::MissingField("sessions"))
        );
        assert_eq!(
            decode_sessions("[1, 2]"),
            Err(ApiError::MissingField("sessions"))
        );
        assert!(matches!(decode_sessions("<html>"), Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_sessions() {
        let transport = Arc::new(MockTransport::with_response(200, r#"{"sessions": [1, 2, 3]}"#));
        let client = ApiClient::new(transport.clone());

        assert_eq!(client.get_sessions().await.unwrap(), json!([1, 2, 3]));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].dest, "/mortimer/api");
        assert_eq!(calls[0].body, json!({"action": "get_sessions"}));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let transport = MockTransport::with_response(500, "Internal Server Error");
        let client = ApiClient::new(transport);

        assert_eq!(
            client.get_sessions().await,
            Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_send_request_without_action_field() {
        let transport = Arc::new(MockTransport::with_response(200, "OK"));
        let client = ApiClient::new(transport.clone());

        let response = client.send_request(&json!([1, 2, 3]), None).await.unwrap();
        assert_eq!(response.body, "OK");
        assert_eq!(transport.calls()[0].body, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_send_request_destination_override() {
        let transport = Arc::new(MockTransport::with_response(200, "{}"));
        let client = ApiClient::new(transport.clone()).with_endpoint("/api/v2");

        client
            .send_request(&json!({"action": "ping"}), Some("/elsewhere"))
            .await
            .unwrap();
        client.send_request(&json!({"action": "ping"}), None).await.unwrap();

        let dests: Vec<_> = transport.calls().into_iter().map(|c| c.dest).collect();
        assert_eq!(dests, vec!["/elsewhere", "/api/v2"]);
    }

    #[tokio::test]
    async fn test_check_images() {
        let transport = Arc::new(MockTransport::with_response(
            200,
            r#"{"image_paths": ["/mortimer/image/data/s1/grid3/aligned_001.png"]}"#,
        ));
        let client = ApiClient::new(transport.clone());

        let paths = client.check_images("/data/s1", "3").await.unwrap();
        assert_eq!(paths, vec!["/mortimer/image/data/s1/grid3/aligned_001.png"]);
        assert_eq!(
            transport.calls()[0].body,
            json!({"action": "check_images", "path": "/data/s1", "grid": "3"})
        );
    }

    #[tokio::test]
    async fn test_mark_and_move_accept_plain_ok() {
        let transport = Arc::new(MockTransport::with_response(200, "OK"));
        let client = ApiClient::new(transport.clone());

        client.mark_grid("s1", "2", "Good").await.unwrap();
        client.move_grid("s1", "2", "Krios").await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].body["action"], "mark_grid");
        assert_eq!(calls[0].body["state"], "Good");
        assert_eq!(calls[1].body["action"], "move_grid");
        assert_eq!(calls[1].body["location"], "Krios");
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let client = ApiClient::new(MockTransport::failing(ApiError::Network(
            "connection refused".into(),
        )));
        assert!(matches!(
            client.get_sessions().await,
            Err(ApiError::Network(_))
        ));
    }
}

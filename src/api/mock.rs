//! Recording transport for tests

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::client::{ApiResponse, Transport};
use super::error::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub dest: String,
    pub body: Value,
}

/// Answers every request with the same outcome and records what was sent.
/// With a gate, each request waits for `Notify::notify_one` before answering.
pub(crate) struct MockTransport {
    outcome: ApiResult<ApiResponse>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn with_response(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(ApiResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, dest: &str, body: &Value) -> ApiResult<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            dest: dest.to_string(),
            body: body.clone(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outcome.clone()
    }
}

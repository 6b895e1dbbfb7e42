//! Startup Hydration
//!
//! Loads the session list once when the application starts. The request
//! runs beside mount; its outcome, success or failure, lands in
//! [`AppState`] so views can react to it.

use crate::api::{ApiClient, Transport};
use crate::state::{SessionsState, SessionsWriter};
#[cfg(feature = "client")]
use crate::state::AppState;

/// Issue `get_sessions` and settle the writer with the outcome
pub async fn hydrate<T: Transport>(client: &ApiClient<T>, writer: SessionsWriter) -> SessionsState {
    writer.begin_loading();
    let result = client.get_sessions().await;
    writer.settle(result)
}

/// Run [`hydrate`] as a background task. Returns `None` if the sessions
/// writer was already claimed.
#[cfg(feature = "client")]
pub fn spawn<T>(
    state: &AppState,
    client: std::sync::Arc<ApiClient<T>>,
) -> Option<tokio::task::JoinHandle<SessionsState>>
where
    T: Transport + 'static,
{
    let writer = state.sessions_writer()?;
    tracing::info!(endpoint = client.endpoint(), "Requesting session list");
    Some(tokio::spawn(async move { hydrate(&client, writer).await }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::ApiError;
    use crate::state::AppState;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hydrate_success() {
        let state = AppState::new();
        let client = ApiClient::new(MockTransport::with_response(200, r#"{"sessions": [1, 2, 3]}"#));

        let settled = hydrate(&client, state.sessions_writer().unwrap()).await;

        assert_eq!(settled.sessions(), Some(&json!([1, 2, 3])));
        assert_eq!(state.sessions().sessions(), Some(&json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn test_hydrate_network_failure() {
        let state = AppState::new();
        let client = ApiClient::new(MockTransport::failing(ApiError::Network("unreachable".into())));

        hydrate(&client, state.sessions_writer().unwrap()).await;

        assert!(state.sessions().sessions().is_none());
        assert!(state.sessions().error().is_some());
    }

    #[tokio::test]
    async fn test_hydrate_malformed_response() {
        let state = AppState::new();
        let client = ApiClient::new(MockTransport::with_response(200, "<html>oops</html>"));

        hydrate(&client, state.sessions_writer().unwrap()).await;

        assert!(matches!(state.sessions(), SessionsState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_spawn_claims_writer_once() {
        let state = AppState::new();
        let transport = Arc::new(MockTransport::with_response(200, r#"{"sessions": []}"#));
        let client = Arc::new(ApiClient::new(transport.clone()));

        let handle = spawn(&state, client.clone()).unwrap();
        assert!(spawn(&state, client).is_none());

        handle.await.unwrap();
        assert_eq!(transport.calls().len(), 1);
    }
}

//! Application State
//!
//! Shared state handed to every view. Cloning is cheap; all clones observe
//! the same data.
//!
//! `sessions` has exactly one writer: the first caller of
//! [`AppState::sessions_writer`] gets it, later callers get `None`. Settling
//! consumes the writer, so bootstrap writes the list at most once. Readers
//! take snapshots or subscribe to changes.

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::sessions::SessionsState;
use crate::api::ApiError;

struct Inner {
    sessions: watch::Sender<SessionsState>,
    writer_taken: AtomicBool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        let (sessions, _) = watch::channel(SessionsState::Unloaded);
        Self {
            inner: Arc::new(Inner {
                sessions,
                writer_taken: AtomicBool::new(false),
            }),
        }
    }

    /// Snapshot of the session list state
    pub fn sessions(&self) -> SessionsState {
        self.inner.sessions.borrow().clone()
    }

    /// Receiver notified on every `sessions` transition
    pub fn subscribe(&self) -> watch::Receiver<SessionsState> {
        self.inner.sessions.subscribe()
    }

    /// Claim the single writer for `sessions`
    pub fn sessions_writer(&self) -> Option<SessionsWriter> {
        if self.inner.writer_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(SessionsWriter {
            inner: Arc::clone(&self.inner),
            settled: false,
        })
    }

    /// Wait until `sessions` is loaded or failed
    pub async fn wait_settled(&self) -> SessionsState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(SessionsState::is_settled).await {
            Ok(state) => state.clone(),
            // The sender lives in `inner`, which we hold, so it cannot close.
            Err(_) => self.sessions(),
        };
        settled
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.inner.sessions.borrow().status())
            .finish()
    }
}

/// Sole writer of `AppState::sessions`.
///
/// Dropping an unsettled writer (for example when the bootstrap task is
/// aborted) records a failure so waiters are released.
pub struct SessionsWriter {
    inner: Arc<Inner>,
    settled: bool,
}

impl SessionsWriter {
    /// Mark the request as in flight
    pub fn begin_loading(&self) {
        tracing::debug!("Sessions loading");
        self.inner.sessions.send_replace(SessionsState::loading());
    }

    /// Store the outcome of the request and give up the writer
    pub fn settle(mut self, result: Result<Value, ApiError>) -> SessionsState {
        self.settled = true;
        let state = SessionsState::from_result(result);
        match &state {
            SessionsState::Loaded { sessions, .. } => {
                tracing::info!(
                    count = super::sessions::session_names(sessions).len(),
                    "Sessions loaded"
                );
            }
            SessionsState::Failed { error, .. } => {
                tracing::warn!(error = %error, "Sessions failed to load");
            }
            _ => {}
        }
        self.inner.sessions.send_replace(state.clone());
        state
    }
}

impl Drop for SessionsWriter {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Sessions writer dropped before settling");
            self.inner.sessions.send_replace(SessionsState::Failed {
                error: "session load abandoned".to_string(),
                failed_at: chrono::Utc::now(),
            });
        }
    }
}

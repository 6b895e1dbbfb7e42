//! Session List State
//!
//! The `sessions` field moves through `Unloaded -> Loading -> Loaded | Failed`.
//! Views branch on the variant instead of guessing whether data has arrived.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiError;

/// Load state of the session list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionsState {
    /// Nothing requested yet
    #[default]
    Unloaded,
    /// Request in flight
    Loading { since: DateTime<Utc> },
    /// Backend answered; `sessions` is the response field, verbatim
    Loaded {
        sessions: Value,
        loaded_at: DateTime<Utc>,
    },
    /// Request or decoding failed
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

/// Per-grid fields of a session record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridInfo {
    pub state: Option<String>,
    pub moved_to: Option<String>,
}

impl SessionsState {
    pub fn loading() -> Self {
        SessionsState::Loading { since: Utc::now() }
    }

    /// Settled state for a finished request
    pub fn from_result(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(sessions) => SessionsState::Loaded {
                sessions,
                loaded_at: Utc::now(),
            },
            Err(e) => SessionsState::Failed {
                error: e.to_string(),
                failed_at: Utc::now(),
            },
        }
    }

    /// The session list, once loaded
    pub fn sessions(&self) -> Option<&Value> {
        match self {
            SessionsState::Loaded { sessions, .. } => Some(sessions),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionsState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SessionsState::Loaded { .. })
    }

    /// Loaded or failed
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SessionsState::Loaded { .. } | SessionsState::Failed { .. }
        )
    }

    pub fn status(&self) -> &'static str {
        match self {
            SessionsState::Unloaded => "unloaded",
            SessionsState::Loading { .. } => "loading",
            SessionsState::Loaded { .. } => "loaded",
            SessionsState::Failed { .. } => "failed",
        }
    }

    /// Session names, empty until loaded
    pub fn session_names(&self) -> Vec<String> {
        self.sessions().map(session_names).unwrap_or_default()
    }

    /// One session's record, if loaded and present
    pub fn session(&self, name: &str) -> Option<&Value> {
        self.sessions().and_then(|s| session_record(s, name))
    }
}

// Tolerant readers for the session list. The backend keys sessions by name
// with records like {"path": .., "grid_info": {"3": {"State": .., "Moved To": ..}}};
// other shapes read as empty.

/// Names in a session list: object keys, or string/number array elements
pub fn session_names(sessions: &Value) -> Vec<String> {
    match sessions {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}

/// Record for `name`. For array-shaped lists the matching element itself.
pub fn session_record<'a>(sessions: &'a Value, name: &str) -> Option<&'a Value> {
    match sessions {
        Value::Object(map) => map.get(name),
        Value::Array(items) => items
            .iter()
            .find(|item| scalar_to_string(item).as_deref() == Some(name)),
        _ => None,
    }
}

/// Session directory on the acquisition host
pub fn session_path(record: &Value) -> Option<&str> {
    record.get("path").and_then(Value::as_str)
}

/// Grid names listed in a record's `grid_info`
pub fn grid_names(record: &Value) -> Vec<String> {
    record
        .get("grid_info")
        .and_then(Value::as_object)
        .map(|grids| grids.keys().cloned().collect())
        .unwrap_or_default()
}

/// State and move location of one grid
pub fn grid_info(record: &Value, grid: &str) -> Option<GridInfo> {
    let info = record.get("grid_info")?.get(grid)?;
    let field = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);
    Some(GridInfo {
        state: field("State"),
        moved_to: field("Moved To"),
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "Screening-20220617": {
                "path": "/goliath/rawdata/Screening-20220617",
                "grid_info": {
                    "1": {"State": "Good"},
                    "2": {"State": "Bad", "Moved To": "Krios"},
                },
            },
            "Screening-20220701": {"path": "/goliath/rawdata/Screening-20220701"},
        })
    }

    #[test]
    fn test_default_is_unloaded() {
        let state = SessionsState::default();
        assert_eq!(state, SessionsState::Unloaded);
        assert!(state.sessions().is_none());
        assert!(!state.is_settled());
        assert!(state.session_names().is_empty());
    }

    #[test]
    fn test_from_result() {
        let loaded = SessionsState::from_result(Ok(json!([1, 2, 3])));
        assert_eq!(loaded.sessions(), Some(&json!([1, 2, 3])));
        assert!(loaded.is_settled());

        let failed = SessionsState::from_result(Err(ApiError::Timeout));
        assert!(failed.sessions().is_none());
        assert_eq!(failed.error(), Some("Request timeout"));
        assert_eq!(failed.status(), "failed");
    }

    #[test]
    fn test_session_names() {
        assert_eq!(
            session_names(&sample()),
            vec!["Screening-20220617", "Screening-20220701"]
        );
        assert_eq!(session_names(&json!([1, "b", null])), vec!["1", "b"]);
        assert!(session_names(&json!("nope")).is_empty());
    }

    #[test]
    fn test_record_helpers() {
        let sessions = sample();
        let record = session_record(&sessions, "Screening-20220617").unwrap();
        assert_eq!(
            session_path(record),
            Some("/goliath/rawdata/Screening-20220617")
        );
        assert_eq!(grid_names(record), vec!["1", "2"]);
        assert_eq!(
            grid_info(record, "2"),
            Some(GridInfo {
                state: Some("Bad".into()),
                moved_to: Some("Krios".into()),
            })
        );
        assert!(grid_info(record, "9").is_none());

        let bare = session_record(&sessions, "Screening-20220701").unwrap();
        assert!(grid_names(bare).is_empty());
        assert!(session_record(&sessions, "missing").is_none());
    }

    #[test]
    fn test_array_records() {
        let sessions = json!([1, 2, 3]);
        assert_eq!(session_record(&sessions, "2"), Some(&json!(2)));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let value = serde_json::to_value(SessionsState::Unloaded).unwrap();
        assert_eq!(value, json!({"status": "unloaded"}));
    }
}

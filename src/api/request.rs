//! Request Envelope
//!
//! Every call to the Mortimer backend is a POST of `{"action": ..., ...}` to
//! a single endpoint, sent with a fixed fetch policy.

use serde::{Deserialize, Serialize};

/// Default backend endpoint
pub const DEFAULT_ENDPOINT: &str = "/mortimer/api";

/// Actions understood by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApiRequest {
    /// List all sessions. Response: `{"sessions": ...}`
    GetSessions,
    /// Aligned preview images for one grid of a session directory.
    /// Response: `{"image_paths": [...]}`
    CheckImages { path: String, grid: String },
    /// Set a grid's state. Response: `OK`
    MarkGrid {
        session: String,
        grid: String,
        state: String,
    },
    /// Record where a grid was moved. Response: `OK`
    MoveGrid {
        session: String,
        grid: String,
        location: String,
    },
}

impl ApiRequest {
    pub fn action(&self) -> &'static str {
        match self {
            ApiRequest::GetSessions => "get_sessions",
            ApiRequest::CheckImages { .. } => "check_images",
            ApiRequest::MarkGrid { .. } => "mark_grid",
            ApiRequest::MoveGrid { .. } => "move_grid",
        }
    }
}

/// Fetch `mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Cors,
    SameOrigin,
    NoCors,
}

/// Fetch `cache`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Default,
    NoStore,
    NoCache,
    Reload,
}

/// Fetch `credentials`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    SameOrigin,
    Include,
}

/// Fetch `redirect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Follow,
    Error,
    Manual,
}

/// Fetch `referrerPolicy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferrerPolicy {
    NoReferrer,
    StrictOriginWhenCrossOrigin,
}

/// Headers and fetch options applied to every API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPolicy {
    pub content_type: &'static str,
    pub mode: RequestMode,
    pub cache: CacheMode,
    pub credentials: Credentials,
    pub redirect: Redirect,
    pub referrer_policy: ReferrerPolicy,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            content_type: "application/json",
            mode: RequestMode::Cors,
            cache: CacheMode::NoCache,
            credentials: Credentials::SameOrigin,
            redirect: Redirect::Follow,
            referrer_policy: ReferrerPolicy::NoReferrer,
        }
    }
}

impl RequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Cors => "cors",
            RequestMode::SameOrigin => "same-origin",
            RequestMode::NoCors => "no-cors",
        }
    }
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Default => "default",
            CacheMode::NoStore => "no-store",
            CacheMode::NoCache => "no-cache",
            CacheMode::Reload => "reload",
        }
    }

    /// `Cache-Control` value a non-browser client should send, if any
    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            CacheMode::Default => None,
            CacheMode::NoStore => Some("no-store"),
            CacheMode::NoCache | CacheMode::Reload => Some("no-cache"),
        }
    }
}

impl Credentials {
    pub fn as_str(&self) -> &'static str {
        match self {
            Credentials::Omit => "omit",
            Credentials::SameOrigin => "same-origin",
            Credentials::Include => "include",
        }
    }
}

impl Redirect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Redirect::Follow => "follow",
            Redirect::Error => "error",
            Redirect::Manual => "manual",
        }
    }
}

impl ReferrerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferrerPolicy::NoReferrer => "no-referrer",
            ReferrerPolicy::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

//! Client-side Routing
//!
//! Maps locations to views. Patterns are checked in order and the first
//! structural match wins; the Mortimer table ends in a catch-all so every
//! location resolves to some view.
//!
//! ## Routes
//!
//! | Pattern                         | Name          | View       |
//! |---------------------------------|---------------|------------|
//! | `/`                             | `home`        | `Home`     |
//! | `/sessions/:session`            | `sessionView` | `Session`  |
//! | `/sessions/:session/grid/:grid` | `gridView`    | `Grid`     |
//! | `/*path`                        | `notFound`    | `NotFound` |

mod error;
mod history;
mod pattern;
mod table;

pub use error::{RouteError, RouteResult};
pub use history::Router;
pub use pattern::{split_path, RouteParams, RoutePattern, Segment};
pub use table::{normalize_base, Resolved, RouteEntry, RouteTable};

use serde::Serialize;

pub const HOME: &str = "home";
pub const SESSION_VIEW: &str = "sessionView";
pub const GRID_VIEW: &str = "gridView";
pub const NOT_FOUND: &str = "notFound";

/// Views the application can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Session,
    Grid,
    NotFound,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Session => "session",
            View::Grid => "grid",
            View::NotFound => "not-found",
        }
    }
}

/// The Mortimer route table under the given history base
pub fn routes(base: &str) -> RouteResult<RouteTable<View>> {
    RouteTable::new(base)
        .route("/", HOME, View::Home)?
        .route("/sessions/:session", SESSION_VIEW, View::Session)?
        .route("/sessions/:session/grid/:grid", GRID_VIEW, View::Grid)?
        .route("/*path", NOT_FOUND, View::NotFound)
}

/// Link to a session view
pub fn session_href(table: &RouteTable<View>, session: &str) -> RouteResult<String> {
    table.href(SESSION_VIEW, &RouteParams::new().with("session", session))
}

/// Link to a grid view
pub fn grid_href(table: &RouteTable<View>, session: &str, grid: &str) -> RouteResult<String> {
    table.href(
        GRID_VIEW,
        &RouteParams::new().with("session", session).with("grid", grid),
    )
}

//! Router error types

use thiserror::Error;

/// Errors raised while building a route table or generating links
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Pattern text is malformed
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Two entries share a name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// A new pattern could match the same paths as an earlier one
    #[error("Route {name:?} ({pattern}) is ambiguous with {other:?}")]
    Ambiguous {
        name: String,
        pattern: String,
        other: String,
    },

    /// A route placed after a catch-all can never be selected
    #[error("Route {name:?} is unreachable after catch-all {catch_all:?}")]
    Unreachable { name: String, catch_all: String },

    /// Reverse routing asked for a name the table does not contain
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Reverse routing was missing a parameter the pattern needs
    #[error("Route {route:?} requires parameter {param:?}")]
    MissingParam { route: String, param: String },
}

/// Result type alias for router operations
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::DuplicateName("home".to_string());
        assert_eq!(err.to_string(), "Duplicate route name: home");

        let err = RouteError::MissingParam {
            route: "gridView".to_string(),
            param: "grid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Route \"gridView\" requires parameter \"grid\""
        );
    }
}

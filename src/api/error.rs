//! API Error Types

use thiserror::Error;

/// Errors that can occur when talking to the Mortimer backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection could not be made or was dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// Response JSON lacked a required field
    #[error("Response is missing field {0:?}")]
    MissingField(&'static str),

    /// Request body could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");

        let err = ApiError::MissingField("sessions");
        assert_eq!(err.to_string(), "Response is missing field \"sessions\"");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let api_err: ApiError = json_err.into();
        assert!(matches!(api_err, ApiError::Decode(_)));
    }
}

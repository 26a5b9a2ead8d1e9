//! Error types for the EatSavvy SDK.

use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK operation errors
///
/// Every variant is a transport-level failure: the directory state is left
/// as it was and the request can simply be retried.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request could not be sent or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or the status reason
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::UnexpectedStatus {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = SdkError::UnexpectedStatus {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 401: Unauthorized");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: SdkError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, SdkError::Decode(_)));
    }
}

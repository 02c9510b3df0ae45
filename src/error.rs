//! Error types for the gateway, configuration and client-side validation

use thiserror::Error;

use crate::constants::DEFAULT_ERROR_MESSAGE;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Everything that can go wrong while talking to the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure: connect, timeout, reading the body
    #[error("{0}")]
    Network(String),

    /// Non-2xx response; the message comes from the JSON body when present
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body does not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Build a server error from a status code and the raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

        ApiError::Server { status, message }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        let msg = if err.is_timeout() {
            "Request timed out (30s)".to_string()
        } else if err.is_connect() {
            format!("Connection failed: {}", err)
        } else {
            format!("Request failed: {}", err)
        };
        ApiError::Network(msg)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// 401/403 responses
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401 | 403, .. })
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extracted() {
        let err = ApiError::from_response(400, r#"{"message":"Movie already exists"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Movie already exists".to_string()
            }
        );
        assert_eq!(err.to_string(), "Movie already exists");
    }

    #[test]
    fn test_default_message_when_body_unusable() {
        for body in ["", "<html>oops</html>", r#"{"error":"x"}"#, r#"{"message":""}"#] {
            let err = ApiError::from_response(500, body);
            assert_eq!(err.to_string(), DEFAULT_ERROR_MESSAGE, "body: {body}");
        }
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_response(401, "{}").is_unauthorized());
        assert!(!ApiError::from_response(404, "{}").is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }
}

/// Error types for the AQI backend client
use thiserror::Error;

/// Main error type for API calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error occurred: {0}")]
    Network(String),

    /// The server answered outside the 2xx range
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    /// The envelope carried `success: false`
    #[error("{0}")]
    Application(String),

    /// The body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Base URL and endpoint did not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ApiError::HttpStatus {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::HttpStatus { status: 503 }.to_string(),
            "HTTP error! status: 503"
        );
        assert_eq!(
            ApiError::Application("City not found".to_string()).to_string(),
            "City not found"
        );
    }

    #[test]
    fn test_json_errors_are_decode_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Decode(_)));
    }
}

//! API error types

use std::time::Duration;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message (the backend's `detail` when present).
        message: String,
        /// Structured `detail` payload, when the backend sent one that is not a plain string.
        detail: Option<serde_json::Value>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Builds an HTTP error from a raw response body.
    ///
    /// FastAPI answers errors as `{"detail": ...}`. A string detail becomes the
    /// message; a structured detail (e.g. a list of validation issues) is kept
    /// in `detail` and the raw body becomes the message.
    pub fn from_body(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|mut v| v.get_mut("detail").map(serde_json::Value::take));

        match detail {
            Some(serde_json::Value::String(message)) => Self::http(status, message),
            Some(detail) => Self::Http {
                status,
                message: body,
                detail: Some(detail),
            },
            None => Self::http(status, body),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the structured `detail` payload if available.
    pub fn detail(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Http { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_becomes_message() {
        let err = ApiError::from_body(404, r#"{"detail":"Empleado no encontrado"}"#.to_string());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Empleado no encontrado");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_structured_detail_is_kept() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"invalid"}]}"#;
        let err = ApiError::from_body(422, body.to_string());
        assert!(err.detail().is_some_and(|d| d.is_array()));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_plain_body() {
        let err = ApiError::from_body(500, "Internal Server Error".to_string());
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert!(err.is_retryable());
    }
}

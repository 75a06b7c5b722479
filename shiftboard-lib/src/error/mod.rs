//! Error types

mod api;
mod auth;
mod validation;

use std::time::Duration;

pub use api::*;
pub use auth::*;
pub use validation::*;

/// Top-level error returned by every fallible client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Obtaining or using credentials failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A draft failed client-side validation and was never sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The backend answered 401. The session token has been cleared.
    #[error("Unauthorized: session expired or missing, log in again")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// The backend kept answering 429 after all retries.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimit { retry_after: Option<Duration> },

    /// A deadline elapsed while waiting on the backend.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Building a spreadsheet export failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation cannot be performed in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Returns the HTTP status if the error came from a backend response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns `true` if retrying the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(api) => api.is_retryable(),
            Self::RateLimit { .. } | Self::Timeout(_) => true,
            _ => false,
        }
    }
}

//! Authentication error types

/// Errors raised by a token source.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The stored token is past its expiry and must be replaced.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },
}

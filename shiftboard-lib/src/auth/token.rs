//! Bearer tokens and where the client gets them

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer token issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    /// Known expiry; `None` when the issuer did not say.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..Self::new(access_token)
        }
    }

    /// A token without a known expiry never counts as expired.
    pub fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(at) if at <= Utc::now())
    }
}

/// Source of the bearer token sent with each request.
///
/// `Ok(None)` means anonymous: the request goes out without an
/// `Authorization` header, which is enough for `/health`. After a 401 the
/// client calls [`TokenProvider::invalidate`] so the rejected token is not
/// sent again.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError>;

    async fn invalidate(&self) {}
}

/// Sends the same token on every request and ignores 401s.
///
/// For scripts with a long-lived service token. Use a
/// [`Session`](super::Session) when a rejected token should be dropped.
///
/// ```
/// use shiftboard_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("service-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError> {
        Ok(Some(self.token.clone()))
    }
}

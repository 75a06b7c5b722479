//! Explicit session state shared between the caller and the client.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// Holds the bearer token for the current user.
///
/// Cheap to clone; all clones share the same token. The caller keeps a
/// clone to observe logouts: when the backend answers 401 the client clears
/// the session, and [`Session::is_authenticated`] turns `false`.
///
/// # Example
///
/// ```
/// use shiftboard_lib::auth::Session;
///
/// let session = Session::with_token("abc");
/// let observer = session.clone();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl Session {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that already holds a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(AccessToken::new(token)))),
        }
    }

    /// Returns the current token, if any.
    pub async fn token(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }

    /// Replaces the current token.
    pub async fn set_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    /// Forgets the current token.
    pub async fn clear(&self) {
        if self.token.write().await.take().is_some() {
            log::info!("Session cleared");
        }
    }

    /// Returns `true` if a token is held and not known to be expired.
    pub async fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .await
            .as_ref()
            .is_some_and(|t| !t.is_expired())
    }
}

#[async_trait]
impl TokenProvider for Session {
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError> {
        match self.token().await {
            Some(token) if token.is_expired() => Err(AuthError::TokenExpired {
                message: "stored token is past its expiry".to_string(),
            }),
            token => Ok(token),
        }
    }

    async fn invalidate(&self) {
        self.clear().await;
    }
}

//! Health and session endpoints

use reqwest::Method;
use serde::Deserialize;

use crate::ShiftboardClient;
use crate::error::Error;
use crate::model::CurrentUser;

/// Response of `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

impl ShiftboardClient {
    /// Checks that the backend is up. Does not require a token.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get_json("/health").await
    }

    /// Returns the user the session token belongs to.
    pub async fn current_user(&self) -> Result<CurrentUser, Error> {
        self.get_json("/api/auth/me").await
    }

    /// Ends the session on the backend and clears the local token.
    ///
    /// The local token is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let result = self.send_empty(Method::POST, "/api/auth/logout").await;
        self.inner.token_provider.invalidate().await;
        log::info!("[auth] logged out");
        result
    }
}

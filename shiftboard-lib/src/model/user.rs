//! The signed-in user

use serde::Deserialize;
use serde::Serialize;

/// Response of `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

//! Authentication Models
//!
//! Data structures for the admin login exchange and the persisted session.

use serde::{Deserialize, Serialize};

/// Signed-in admin session, persisted between runs
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub name: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}

/// Login request payload
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` of a successful login response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub token: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Self {
            token: data.token,
            role: data.role,
            name: data.full_name,
        }
    }
}

// ============================================================================
// Registry Core - Session & User Profile
// File: crates/registry-core/src/domain/user.rs
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_role() -> String {
    "user".to_string()
}

/// Profile returned by `GET /api/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub household_id: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Response of the form-encoded login exchange.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Registration payload for `POST /api/auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterProfile {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl RegisterProfile {
    pub fn new(username: &str, password: &str, full_name: Option<&str>) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
            full_name: full_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }
}

impl fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Process-wide authentication state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn view(&self) -> AuthView {
        match (&self.token, &self.user) {
            (Some(_), Some(user)) => AuthView::SignedIn {
                username: user.username.clone(),
                role: user.role.clone(),
            },
            _ => AuthView::Anonymous,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// What the auth area of the UI shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthView {
    Anonymous,
    SignedIn { username: String, role: String },
}

//! Login, registration, logout and session restore.

use registry_core::{AuthView, ClientError, RegisterProfile, Session, TokenResponse, UserProfile};
use reqwest::Method;
use tracing::{info, warn};

use crate::request::RequestClient;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const ME_PATH: &str = "/api/me";

pub const LOGIN_SUCCESS: &str = "Đăng nhập thành công";
pub const LOGIN_FAILED: &str = "Đăng nhập thất bại";
pub const LOGOUT_DONE: &str = "Đã đăng xuất";
pub const REGISTER_SUCCESS: &str = "Đăng ký thành công, vui lòng đăng nhập";
pub const REGISTER_FAILED: &str = "Đăng ký thất bại";

#[derive(Clone)]
pub struct AuthService {
    client: RequestClient,
}

impl AuthService {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    /// Validate a persisted token against `/api/me`. Any failure ends anonymous.
    pub async fn restore(&self) -> AuthView {
        let session = self.client.session();
        let token = match session.persisted_token() {
            Ok(Some(token)) => token,
            Ok(None) => return AuthView::Anonymous,
            Err(e) => {
                warn!(error = %e, "Unreadable persisted token, starting anonymous");
                session.clear();
                return AuthView::Anonymous;
            }
        };

        session.adopt_token(token);
        match self.client.get_json_quiet::<UserProfile>(ME_PATH).await {
            Ok(user) => {
                info!(username = %user.username, role = %user.role, "Session restored");
                session.set_user(user);
                session.view()
            }
            Err(e) => {
                warn!(error = %e, "Persisted token rejected, clearing session");
                session.clear();
                AuthView::Anonymous
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        match self.exchange(username.trim(), password).await {
            Ok(session) => {
                info!(username = %username.trim(), "Logged in");
                self.client.notices().success(LOGIN_SUCCESS);
                Ok(session)
            }
            Err(e) => {
                warn!(username = %username.trim(), error = %e, "Login failed");
                self.client.notices().error(LOGIN_FAILED);
                Err(e)
            }
        }
    }

    async fn exchange(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let raw = self
            .client
            .post_form(LOGIN_PATH, &[("username", username), ("password", password)])
            .await
            .map_err(rejected_as_auth)?;
        let tokens: TokenResponse = serde_json::from_value(raw).map_err(|e| ClientError::Decode {
            path: LOGIN_PATH.to_string(),
            message: e.to_string(),
        })?;

        let session = self.client.session();
        session.set_token(&tokens.access_token)?;

        match self.client.get_json_quiet::<UserProfile>(ME_PATH).await {
            Ok(user) => {
                session.set_user(user);
                Ok(session.snapshot())
            }
            Err(e) => {
                session.clear();
                Err(ClientError::Auth(format!("profile lookup failed: {}", e)))
            }
        }
    }

    /// Never fails; storage problems are logged by the session store.
    pub fn logout(&self) {
        self.client.session().clear();
        info!("Logged out");
        self.client.notices().success(LOGOUT_DONE);
    }

    /// Creates the account only; the caller still has to log in.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<(), ClientError> {
        let body = serde_json::to_value(profile).map_err(|e| ClientError::Decode {
            path: REGISTER_PATH.to_string(),
            message: e.to_string(),
        })?;

        match self
            .client
            .request_quiet(Method::POST, REGISTER_PATH, Some(&body))
            .await
            .map_err(rejected_as_auth)
        {
            Ok(_) => {
                info!(username = %profile.username, "Registered");
                self.client.notices().success(REGISTER_SUCCESS);
                Ok(())
            }
            Err(e) => {
                warn!(username = %profile.username, error = %e, "Registration failed");
                self.client.notices().error(REGISTER_FAILED);
                Err(e)
            }
        }
    }

    pub fn view(&self) -> AuthView {
        self.client.session().view()
    }
}

/// A server rejection of an auth exchange is an auth error, not an API error.
fn rejected_as_auth(err: ClientError) -> ClientError {
    match err {
        ClientError::Api { status, path } => {
            ClientError::Auth(format!("{} rejected with status {}", path, status))
        }
        other => other,
    }
}

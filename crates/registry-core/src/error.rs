//! Client error taxonomy

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error {status} on {path}")]
    Api { status: u16, path: String },

    #[error("Network error on {path}: {message}")]
    Network { path: String, message: String },

    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("{operation} is not supported for {path}")]
    Unsupported { operation: &'static str, path: String },

    #[error("No form is open")]
    NoOpenForm,
}

impl ClientError {
    /// HTTP status, present only when the server actually answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            ClientError::Api { path, .. }
            | ClientError::Network { path, .. }
            | ClientError::Decode { path, .. }
            | ClientError::Unsupported { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

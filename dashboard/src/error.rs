//! Error handling for the Rice Retail Dashboard client
//!
//! Backend-reported failures are values, not panics: every call returns a
//! `ClientResult` and the controller decides what the user sees.

use serde_json::Value;
use thiserror::Error;

/// Generic alert shown when the network itself failed
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response, or a body carrying an `error` key
    #[error("Backend error ({status}): {message}")]
    Backend {
        status: u16,
        message: String,
        body: Value,
    },

    /// A successful body that does not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl ClientError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        ClientError::Backend {
            status,
            body: serde_json::json!({ "error": message, "status": status }),
            message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// HTTP status of a backend error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for an alert dialog
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Backend { message, .. } => message.clone(),
            ClientError::Decode(_) => "Unexpected response from server".to_string(),
            ClientError::Configuration(_) => "Client is misconfigured".to_string(),
        }
    }
}

/// Result type alias for API calls
pub type ClientResult<T> = Result<T, ClientError>;

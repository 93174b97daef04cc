//! Error handling for the FoodShare client

use std::fmt;
use thiserror::Error;

/// Unified error type for backend calls
///
/// Every variant is handled the same way at the store and flow boundary:
/// it is logged and the held state is left as it was.
#[derive(Error, Debug)]
pub enum Error {
    /// The call never reached the server or no response came back
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server rejected request with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ServerRejection {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// No requester identity could be resolved
    #[error("Identity error: {0}")]
    Identity(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new server rejection error
    pub fn rejection(status: u16, message: Option<String>) -> Self {
        Error::ServerRejection { status, message }
    }

    /// Create a new identity error
    pub fn identity<T: fmt::Display>(msg: T) -> Self {
        Error::Identity(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// The message the server attached to a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::ServerRejection { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Local form validation failure
///
/// Blocks a submission before any network call. Not logged as an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("quantity must not be empty")]
    EmptyQuantity,

    #[error("message must not be empty")]
    EmptyMessage,
}

pub type Result<T> = std::result::Result<T, Error>;

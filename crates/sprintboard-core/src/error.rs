use std::time::Duration;

use thiserror::Error;

pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please login again.";

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Remote rejected request (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Remote {
        status: u16,
        message: Option<String>,
    },

    #[error("No access token configured")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Message suitable for showing to the person at the board.
    ///
    /// Remote rejections surface the server's own message when it sent one;
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BoardError::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            BoardError::Unauthenticated => AUTH_REQUIRED_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the failure happened on the wire rather than in the remote's
    /// decision about the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, BoardError::Transport(_) | BoardError::Timeout(_))
    }
}

//! Client error definitions.

use thiserror::Error;

/// Connection state machine errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The event is not allowed in the current state
    #[error("cannot handle '{event}' while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

/// Errors that end a client run
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Invalid server event: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

//! Error types for the signaling client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection dropped after it was established
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// An input line could not be turned into a payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reconnection attempts are exhausted
    #[error("Gave up after {0} reconnection attempts")]
    ReconnectExhausted(u32),
}

//! Domain error types.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Connection id must not be empty")]
    EmptyConnectionId,

    #[error("Connection id is too long ({0} bytes)")]
    ConnectionIdTooLong(usize),
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The id is already live; the existing entry is kept as is.
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(ConnectionId),
}

/// Errors raised while delivering an outbound event to a single connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No outbound channel is registered for the id.
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),

    /// The connection's outbound channel is already closed.
    #[error("Channel for connection '{0}' is closed")]
    ChannelClosed(ConnectionId),
}

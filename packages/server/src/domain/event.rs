//! Inbound and outbound relay events.
//!
//! Every transport callback (connect, message, disconnect, error) is turned
//! into one `InboundEvent` and handed to the dispatcher, so the per-connection
//! lifecycle is decided in a single place.

use super::{
    signal::SignalingPayload, transport::OutboundChannel, value_object::ConnectionId,
};

/// Event raised by the transport for one connection
#[derive(Debug)]
pub enum InboundEvent {
    /// A new connection was opened. `outbox` receives everything addressed to it.
    Connect {
        id: ConnectionId,
        outbox: OutboundChannel,
    },
    /// The connection sent a signaling payload.
    Message {
        id: ConnectionId,
        payload: SignalingPayload,
    },
    /// The connection closed, gracefully or through a keep-alive timeout.
    Disconnect { id: ConnectionId },
    /// The transport observed an error on the connection; it may still be open.
    TransportError { id: ConnectionId, reason: String },
}

impl InboundEvent {
    pub fn connection_id(&self) -> &ConnectionId {
        match self {
            InboundEvent::Connect { id, .. }
            | InboundEvent::Message { id, .. }
            | InboundEvent::Disconnect { id }
            | InboundEvent::TransportError { id, .. } => id,
        }
    }
}

/// Event delivered to clients
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    /// Handshake sent only to a newly opened connection with its own id.
    Connected { sid: ConnectionId },
    /// Number of live connections after a connect or disconnect.
    UserCount { count: usize },
    /// A connection left.
    UserDisconnected { sid: ConnectionId },
    /// A relayed signaling payload.
    Message(SignalingPayload),
}

impl OutboundEvent {
    /// Wire event name understood by clients.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Connected { .. } => "connected",
            OutboundEvent::UserCount { .. } => "user_count",
            OutboundEvent::UserDisconnected { .. } => "user_disconnected",
            OutboundEvent::Message(_) => "message",
        }
    }
}

/// Set of connections an outbound event is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every live connection, including the one that triggered the event.
    All,
    /// Every live connection except the given one.
    AllExcept(ConnectionId),
}

impl Audience {
    /// Resolve the audience against a membership snapshot.
    pub fn resolve(&self, members: &[ConnectionId]) -> Vec<ConnectionId> {
        match self {
            Audience::All => members.to_vec(),
            Audience::AllExcept(excluded) => members
                .iter()
                .filter(|id| *id != excluded)
                .cloned()
                .collect(),
        }
    }
}

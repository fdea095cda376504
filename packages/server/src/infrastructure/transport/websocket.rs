//! WebSocket transport backed by per-connection channels.
//!
//! The UI layer owns the sockets and creates one unbounded channel per
//! connection; its writer task drains the channel into the socket. This type
//! only keeps the sending halves, so `send_to` never waits on a slow peer.

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DeliveryError, OutboundChannel, OutboundEvent, SignalTransport,
};

/// Channel registry used to push outbound events to WebSocket clients
#[derive(Default)]
pub struct WebSocketTransport {
    /// Key: connection id, Value: sending half of the connection's outbox
    clients: Mutex<HashMap<ConnectionId, OutboundChannel>>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalTransport for WebSocketTransport {
    async fn register(&self, id: ConnectionId, outbox: OutboundChannel) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.entry(id) {
            Entry::Occupied(entry) => {
                tracing::warn!(sid = %entry.key(), "Outbox already registered");
                false
            }
            Entry::Vacant(entry) => {
                tracing::debug!(sid = %entry.key(), "Outbox registered");
                entry.insert(outbox);
                true
            }
        }
    }

    async fn unregister(&self, id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(id).is_some() {
            tracing::debug!(sid = %id, "Outbox unregistered");
        }
    }

    async fn send_to(&self, id: &ConnectionId, event: &OutboundEvent) -> Result<(), DeliveryError> {
        let outbox = {
            let clients = self.clients.lock().await;
            clients.get(id).cloned()
        };

        let outbox = outbox.ok_or_else(|| DeliveryError::ConnectionNotFound(id.clone()))?;
        outbox
            .send(event.clone())
            .map_err(|_| DeliveryError::ChannelClosed(id.clone()))
    }
}

//! Outbound transport abstraction.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::DeliveryError, event::OutboundEvent, value_object::ConnectionId};

/// Channel feeding one connection's socket writer.
pub type OutboundChannel = mpsc::UnboundedSender<OutboundEvent>;

/// Unicast delivery to connected clients.
///
/// Broadcasting is built on top of `send_to` by the dispatcher, so a failure
/// for one recipient never affects the others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignalTransport: Send + Sync {
    /// Attach the outbound channel of a newly connected client.
    ///
    /// Returns `false` and keeps the existing channel if `id` already has one.
    async fn register(&self, id: ConnectionId, outbox: OutboundChannel) -> bool;

    /// Detach a client. Detaching an unknown id is a no-op.
    async fn unregister(&self, id: &ConnectionId);

    /// Deliver one event to one client.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the client is unknown or its channel is closed.
    async fn send_to(&self, id: &ConnectionId, event: &OutboundEvent) -> Result<(), DeliveryError>;
}

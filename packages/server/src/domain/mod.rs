//! Domain layer: connection bookkeeping and the signaling vocabulary.
//!
//! This layer owns the value objects, the inbound/outbound event types and the
//! traits (`ConnectionRegistry`, `SignalTransport`) that the infrastructure
//! layer implements.

pub mod entity;
pub mod error;
pub mod event;
pub mod registry;
pub mod signal;
pub mod transport;
pub mod value_object;

pub use entity::Connection;
pub use error::{DeliveryError, RegistryError, ValueObjectError};
pub use event::{Audience, InboundEvent, OutboundEvent};
pub use registry::ConnectionRegistry;
pub use signal::{SignalKind, SignalingPayload};
pub use transport::{OutboundChannel, SignalTransport};
pub use value_object::{ConnectionId, Timestamp};

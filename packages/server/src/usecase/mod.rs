//! UseCase layer.
//!
//! - `relay_dispatcher`: connection lifecycle and signaling relay

pub mod relay_dispatcher;

pub use relay_dispatcher::{DeliveryReport, DispatchOutcome, RelayDispatcher};

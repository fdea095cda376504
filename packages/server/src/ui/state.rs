//! Shared application state.

use std::sync::Arc;

use crate::{config::KeepAliveConfig, usecase::RelayDispatcher};

/// Shared application state
pub struct AppState {
    /// Sole owner of the connection registry
    pub dispatcher: Arc<RelayDispatcher>,
    /// Keep-alive applied to every WebSocket connection
    pub keepalive: KeepAliveConfig,
}

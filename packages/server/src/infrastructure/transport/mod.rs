//! Outbound transport implementations.
//!
//! - `websocket`: per-connection channels drained by the WebSocket writer task

pub mod websocket;

pub use websocket::WebSocketTransport;

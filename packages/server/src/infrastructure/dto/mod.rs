//! Data Transfer Objects (DTOs) for the signaling relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs
//! - `http`: HTTP API response DTOs

pub mod http;
pub mod websocket;

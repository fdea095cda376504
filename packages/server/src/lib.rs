//! WebRTC signaling relay library.
//!
//! Accepts WebSocket connections, tracks which clients are live and relays
//! every signaling payload from its sender to all other connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

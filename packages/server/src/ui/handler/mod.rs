//! Request handlers.

mod http;
mod websocket;

pub use http::{get_connections, health_check, index_page};
pub use websocket::websocket_handler;

//! WebRTC signaling relay.
//!
//! Relays every signaling payload from its sender to all other connected
//! clients and announces connects and disconnects.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-server
//! cargo run --bin tsunagi-server -- --host 0.0.0.0 --port 5000
//! ```

use std::sync::Arc;

use clap::Parser;
use tsunagi_server::{
    config::{Args, ServerConfig},
    infrastructure::{registry::InMemoryConnectionRegistry, transport::WebSocketTransport},
    ui::Server,
    usecase::RelayDispatcher,
};
use tsunagi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::try_from(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Transport
    // 3. Dispatcher
    // 4. Server
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let transport = Arc::new(WebSocketTransport::new());
    let dispatcher = Arc::new(RelayDispatcher::new(registry, transport));

    let server = Server::new(dispatcher, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Command-line signaling client.
//!
//! Connects to the relay, prints every event and sends each input line as a
//! signaling payload. Reconnects on disconnection (max 5 attempts with a
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-client
//! cargo run --bin tsunagi-client -- --url ws://127.0.0.1:5000/ws
//! ```

use clap::Parser;

use tsunagi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsunagi-client")]
#[command(about = "Command-line client for the Tsunagi signaling relay", long_about = None)]
struct Args {
    /// WebSocket URL of the relay
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = tsunagi_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

//! Command-line client for the Tsunagi signaling relay.
//!
//! Connects to the relay, prints every event it receives and sends each
//! input line as a signaling payload.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use domain::parse_input;
pub use error::ClientError;
pub use runner::run_client;

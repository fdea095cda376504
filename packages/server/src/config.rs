//! Server configuration.
//!
//! Command-line flags (with environment variable fallbacks) are parsed into
//! [`Args`] and validated into a [`ServerConfig`].

use std::time::Duration;

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("Host must not be empty")]
    EmptyHost,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tsunagi-server")]
#[command(about = "WebSocket signaling relay for peer-to-peer WebRTC sessions", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TSUNAGI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TSUNAGI_PORT", default_value = "5000")]
    pub port: u16,

    /// Seconds between keep-alive pings
    #[arg(long, env = "TSUNAGI_PING_INTERVAL_SECS", default_value = "25")]
    pub ping_interval_secs: u64,

    /// Extra seconds a silent connection is tolerated after a ping
    #[arg(long, env = "TSUNAGI_PING_TIMEOUT_SECS", default_value = "20")]
    pub ping_timeout_secs: u64,

    /// Origin allowed by CORS on the HTTP API ("*" for any)
    #[arg(long, env = "TSUNAGI_ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "TSUNAGI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Transport keep-alive settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveConfig {
    pub ping_interval: Duration,
    pub ping_timeout: Duration,
}

impl KeepAliveConfig {
    /// Silence longer than this marks a connection as dead.
    pub fn idle_limit(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(25),
            ping_timeout: Duration::from_secs(20),
        }
    }
}

/// CORS origin policy for the HTTP API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    Any,
    Exact(HeaderValue),
}

/// Validated server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub keepalive: KeepAliveConfig,
    pub allowed_origin: AllowedOrigin,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            keepalive: KeepAliveConfig::default(),
            allowed_origin: AllowedOrigin::Any,
        }
    }
}

impl TryFrom<&Args> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if args.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if args.ping_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("ping interval"));
        }
        if args.ping_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("ping timeout"));
        }

        let allowed_origin = match args.allowed_origin.trim() {
            "*" => AllowedOrigin::Any,
            origin => HeaderValue::from_str(origin)
                .map(AllowedOrigin::Exact)
                .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?,
        };

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            keepalive: KeepAliveConfig {
                ping_interval: Duration::from_secs(args.ping_interval_secs),
                ping_timeout: Duration::from_secs(args.ping_timeout_secs),
            },
            allowed_origin,
        })
    }
}

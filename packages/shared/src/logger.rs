//! Logging setup utilities for the signaling relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the calling binary and for every `tsunagi_*` crate.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tsunagi_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use tsunagi_shared::logger::setup_logger;
///
/// setup_logger("tsunagi-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "tsunagi_shared={level},tsunagi_server={level},tsunagi_client={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "tsunagi-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("tsunagi_server=debug"));
        assert!(!filter.contains("tsunagi-server"));
    }

    #[test]
    fn test_default_filter_parses_as_env_filter() {
        // テスト項目: 生成したディレクティブが EnvFilter として解釈できる
        // given (前提条件):
        let filter = default_filter("tsunagi-client", "info");

        // when (操作):
        let parsed = tracing_subscriber::EnvFilter::try_new(&filter);

        // then (期待する結果):
        assert!(parsed.is_ok());
    }
}

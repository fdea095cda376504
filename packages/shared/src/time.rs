//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a timestamp as `HH:MM:SS` for terminal output.
pub fn format_clock_time(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .format("%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        // テスト項目: FixedClock が固定のタイムスタンプを返す
        // given (前提条件):
        let clock = FixedClock::new(1_700_000_000_000);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(second, 1_700_000_000_000);
    }

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプが RFC 3339 (UTC) に変換される
        // given (前提条件):
        let timestamp = 1_700_000_000_123;

        // when (操作):
        let formatted = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(formatted, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_format_clock_time() {
        // テスト項目: 時刻部分のみが HH:MM:SS で出力される
        // given (前提条件):
        let timestamp = 1_700_000_000_123;

        // when (操作):
        let formatted = format_clock_time(timestamp);

        // then (期待する結果):
        assert_eq!(formatted, "22:13:20");
    }
}

//! Value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque identifier of one live connection.
///
/// Assigned by the transport layer when a client connects. The relay never
/// interprets its contents; clients receive it as `sid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    const MAX_LEN: usize = 128;

    /// Create a ConnectionId from an existing string.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, whitespace only, or longer than 128 bytes.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        if value.len() > Self::MAX_LEN {
            return Err(ValueObjectError::ConnectionIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    /// Generate a fresh, random connection id (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_accepts_valid_value() {
        // テスト項目: 通常の文字列から ConnectionId を生成できる
        // given (前提条件):
        let value = "peer-a".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "peer-a");
    }

    #[test]
    fn test_connection_id_rejects_blank_value() {
        // テスト項目: 空白のみの ID はエラーになる
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_rejects_too_long_value() {
        // テスト項目: 上限を超える長さの ID はエラーになる
        // given (前提条件):
        let value = "x".repeat(129);

        // when (操作):
        let result = ConnectionId::try_from(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ConnectionIdTooLong(129)));
    }

    #[test]
    fn test_generated_connection_ids_are_unique() {
        // テスト項目: generate() は毎回異なる ID を返す
        // given / when (前提条件 / 操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}

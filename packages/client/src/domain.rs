//! Domain logic for client-side operations.
//!
//! Pure functions for turning input lines into payloads and for the
//! reconnection policy.

use serde_json::{Map, Value, json};

use crate::error::ClientError;

/// Turn one input line into a signaling payload.
///
/// Accepted forms:
/// - a JSON object or array, sent verbatim
/// - `offer <value>`, `answer <value>`, `candidate <value>`: wrapped into
///   `{"offer": ...}`, `{"answer": ...}`, `{"iceCandidate": ...}`; the value is
///   parsed as JSON when possible, otherwise sent as a string
/// - `hangup`: `{"hangup": true}`
pub fn parse_input(line: &str) -> Result<Value, ClientError> {
    let line = line.trim();
    if line.starts_with('{') || line.starts_with('[') {
        return serde_json::from_str(line)
            .map_err(|e| ClientError::InvalidInput(format!("malformed JSON: {e}")));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let field = match command {
        "offer" => "offer",
        "answer" => "answer",
        "candidate" => "iceCandidate",
        "hangup" => return Ok(json!({ "hangup": true })),
        _ => {
            return Err(ClientError::InvalidInput(format!(
                "unknown command '{command}' (use JSON, offer, answer, candidate or hangup)"
            )));
        }
    };

    if rest.is_empty() {
        return Err(ClientError::InvalidInput(format!("'{command}' needs a value")));
    }
    let value = serde_json::from_str(rest).unwrap_or_else(|_| Value::String(rest.to_string()));
    let mut payload = Map::new();
    payload.insert(field.to_string(), value);
    Ok(Value::Object(payload))
}

/// Check if the client should attempt to reconnect.
///
/// Input errors never trigger a reconnect; connection errors do until
/// `max_attempts` is reached.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    match error {
        ClientError::ConnectionError(_) | ClientError::ConnectionLost(_) => {
            current_attempt < max_attempts
        }
        ClientError::InvalidInput(_) | ClientError::ReconnectExhausted(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_json_is_sent_verbatim() {
        // テスト項目: JSON 入力はそのままペイロードになる
        // given (前提条件):
        let line = r#"{"offer": {"type": "offer", "sdp": "v=0"}, "extra": 1}"#;

        // when (操作):
        let result = parse_input(line).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            json!({"offer": {"type": "offer", "sdp": "v=0"}, "extra": 1})
        );
    }

    #[test]
    fn test_parse_input_commands() {
        // テスト項目: コマンド形式の入力が既知のフィールドに変換される
        // given (前提条件):
        let cases = [
            ("offer v=0", json!({"offer": "v=0"})),
            ("answer {\"type\":\"answer\"}", json!({"answer": {"type": "answer"}})),
            ("candidate candidate:1 1 udp", json!({"iceCandidate": "candidate:1 1 udp"})),
            ("hangup", json!({"hangup": true})),
            ("  hangup  ", json!({"hangup": true})),
        ];

        for (line, expected) in cases {
            // when (操作):
            let result = parse_input(line).unwrap();

            // then (期待する結果):
            assert_eq!(result, expected, "input: {line}");
        }
    }

    #[test]
    fn test_parse_input_rejects_invalid_lines() {
        // テスト項目: 不正な入力はエラーになる
        // given (前提条件):
        let lines = ["{not json", "wave hello", "offer", "candidate   "];

        for line in lines {
            // when (操作):
            let result = parse_input(line);

            // then (期待する結果):
            assert!(
                matches!(result, Err(ClientError::InvalidInput(_))),
                "input: {line}"
            );
        }
    }

    #[test]
    fn test_should_attempt_reconnect_on_connection_errors() {
        // テスト項目: 接続エラーは上限回数まで再接続する
        // given (前提条件):
        let error = ClientError::ConnectionLost("reset".to_string());

        // when / then (操作 / 期待する結果):
        assert!(should_attempt_reconnect(&error, 0, 5));
        assert!(should_attempt_reconnect(&error, 4, 5));
        assert!(!should_attempt_reconnect(&error, 5, 5));
    }

    #[test]
    fn test_should_not_reconnect_on_input_errors() {
        // テスト項目: 入力エラーでは再接続しない
        // given (前提条件):
        let error = ClientError::InvalidInput("bad".to_string());

        // when / then (操作 / 期待する結果):
        assert!(!should_attempt_reconnect(&error, 0, 5));
    }
}

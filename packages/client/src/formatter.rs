//! Event formatting utilities for client display.

use serde_json::Value;
use tsunagi_server::{domain::SignalingPayload, infrastructure::dto::websocket::EventFrame};
use tsunagi_shared::time::format_clock_time;

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format one relay event.
    ///
    /// # Arguments
    ///
    /// * `frame` - The decoded event frame
    /// * `received_at` - Unix timestamp when the frame arrived (milliseconds)
    pub fn format_event(frame: &EventFrame, received_at: i64) -> String {
        let time = format_clock_time(received_at);
        match frame.event.as_str() {
            "connected" => format!("\n[{}] * connected as {}\n", time, sid_of(&frame.data)),
            "user_count" => {
                let count = frame.data["count"].as_u64().unwrap_or(0);
                let noun = if count == 1 { "peer" } else { "peers" };
                format!("\n[{}] # {} {} connected\n", time, count, noun)
            }
            "user_disconnected" => format!("\n[{}] - {} left\n", time, sid_of(&frame.data)),
            "message" => {
                let payload = SignalingPayload::new(frame.data.clone());
                let kind = payload
                    .classify()
                    .map(|kind| kind.to_string())
                    .unwrap_or_else(|| "unclassified".to_string());
                format!("\n[{}] < [{}] {}\n", time, kind, frame.data)
            }
            other => format!("\n[{}] ? {} {}\n", time, other, frame.data),
        }
    }

    /// Format a text frame that is not a valid event envelope
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format the confirmation shown after sending a payload
    pub fn format_sent_confirmation(payload: &Value, sent_at: i64) -> String {
        let kind = SignalingPayload::new(payload.clone())
            .classify()
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "unclassified".to_string());
        format!("[{}] > [{}] sent\n", format_clock_time(sent_at), kind)
    }
}

fn sid_of(data: &Value) -> &str {
    data["sid"].as_str().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 2023-11-14T22:13:20Z
    const AT: i64 = 1_700_000_000_000;

    fn frame(event: &str, data: Value) -> EventFrame {
        EventFrame {
            event: event.to_string(),
            data,
        }
    }

    #[test]
    fn test_format_user_count() {
        // テスト項目: user_count が人数付きで表示される（単数・複数）
        // given (前提条件):
        let one = frame("user_count", json!({"count": 1}));
        let many = frame("user_count", json!({"count": 3}));

        // when / then (操作 / 期待する結果):
        assert_eq!(
            EventFormatter::format_event(&one, AT),
            "\n[22:13:20] # 1 peer connected\n"
        );
        assert_eq!(
            EventFormatter::format_event(&many, AT),
            "\n[22:13:20] # 3 peers connected\n"
        );
    }

    #[test]
    fn test_format_connected_and_disconnected() {
        // テスト項目: 接続・切断イベントに sid が表示される
        // given (前提条件):
        let connected = frame("connected", json!({"sid": "abc"}));
        let left = frame("user_disconnected", json!({"sid": "xyz"}));

        // when / then (操作 / 期待する結果):
        assert_eq!(
            EventFormatter::format_event(&connected, AT),
            "\n[22:13:20] * connected as abc\n"
        );
        assert_eq!(
            EventFormatter::format_event(&left, AT),
            "\n[22:13:20] - xyz left\n"
        );
    }

    #[test]
    fn test_format_message_with_classification() {
        // テスト項目: message は分類結果とペイロードが表示される
        // given (前提条件):
        let offer = frame("message", json!({"offer": "x"}));
        let other = frame("message", json!({"ping": 1}));

        // when / then (操作 / 期待する結果):
        assert_eq!(
            EventFormatter::format_event(&offer, AT),
            "\n[22:13:20] < [offer] {\"offer\":\"x\"}\n"
        );
        assert_eq!(
            EventFormatter::format_event(&other, AT),
            "\n[22:13:20] < [unclassified] {\"ping\":1}\n"
        );
    }

    #[test]
    fn test_format_sent_confirmation() {
        // テスト項目: 送信確認に分類結果が表示される
        // given (前提条件):
        let payload = json!({"iceCandidate": {}});

        // when (操作):
        let result = EventFormatter::format_sent_confirmation(&payload, AT);

        // then (期待する結果):
        assert_eq!(result, "[22:13:20] > [iceCandidate] sent\n");
    }
}

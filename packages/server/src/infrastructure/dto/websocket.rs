//! WebSocket wire format.
//!
//! Outbound frames are JSON text frames of the form
//! `{"event": "<name>", "data": <payload>}`. Inbound text frames carry the
//! signaling payload itself.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{OutboundEvent, SignalingPayload};

/// Envelope of every frame the server sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    pub data: Value,
}

impl From<&OutboundEvent> for EventFrame {
    fn from(event: &OutboundEvent) -> Self {
        let data = match event {
            OutboundEvent::Connected { sid } | OutboundEvent::UserDisconnected { sid } => {
                json!({ "sid": sid.as_str() })
            }
            OutboundEvent::UserCount { count } => json!({ "count": count }),
            OutboundEvent::Message(payload) => payload.as_value().clone(),
        };
        Self {
            event: event.name().to_string(),
            data,
        }
    }
}

/// Serialize an outbound event into a text frame.
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EventFrame::from(event))
}

/// Parse an inbound text frame into a signaling payload.
pub fn decode_payload(text: &str) -> Result<SignalingPayload, serde_json::Error> {
    serde_json::from_str::<Value>(text).map(SignalingPayload::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;

    #[test]
    fn test_encode_user_count() {
        // テスト項目: user_count は {count} ペイロードで送られる
        // given (前提条件):
        let event = OutboundEvent::UserCount { count: 2 };

        // when (操作):
        let text = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"event": "user_count", "data": {"count": 2}}));
    }

    #[test]
    fn test_encode_user_disconnected() {
        // テスト項目: user_disconnected は {sid} ペイロードで送られる
        // given (前提条件):
        let sid = ConnectionId::try_from("peer-b").unwrap();
        let event = OutboundEvent::UserDisconnected { sid };

        // when (操作):
        let text = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"event": "user_disconnected", "data": {"sid": "peer-b"}})
        );
    }

    #[test]
    fn test_encode_message_forwards_payload_verbatim() {
        // テスト項目: message はペイロードを一切変更せずに転送する
        // given (前提条件):
        let payload = json!({
            "iceCandidate": {"candidate": "candidate:1 1 udp 2122260223 10.0.0.1 54321 typ host", "sdpMLineIndex": 0},
            "extra": [1, 2, {"nested": null}],
        });
        let event = OutboundEvent::Message(SignalingPayload::new(payload.clone()));

        // when (操作):
        let text = encode_event(&event).unwrap();

        // then (期待する結果):
        let frame: EventFrame = serde_json::from_str(&text).unwrap();
        assert_eq!(frame.event, "message");
        assert_eq!(frame.data, payload);
    }

    #[test]
    fn test_decode_payload() {
        // テスト項目: JSON テキストはペイロードとして解釈され、不正な JSON はエラーになる
        // given (前提条件):
        let valid = r#"{"offer": {"type": "offer", "sdp": "v=0"}}"#;
        let invalid = "offer: not json";

        // when (操作):
        let decoded = decode_payload(valid);
        let rejected = decode_payload(invalid);

        // then (期待する結果):
        assert_eq!(
            decoded.unwrap().as_value(),
            &json!({"offer": {"type": "offer", "sdp": "v=0"}})
        );
        assert!(rejected.is_err());
    }
}

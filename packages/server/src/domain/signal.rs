//! Signaling payloads and their observational classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque signaling payload, forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalingPayload(Value);

impl SignalingPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Classify the payload by the first well-known field it carries.
    ///
    /// Fields are checked in the order `offer`, `answer`, `iceCandidate`,
    /// `hangup`. Only key presence matters; values are never inspected.
    /// Returns `None` for non-object payloads and objects with none of the keys.
    pub fn classify(&self) -> Option<SignalKind> {
        let fields = self.0.as_object()?;
        SignalKind::PRIORITY
            .into_iter()
            .find(|kind| fields.contains_key(kind.field_name()))
    }
}

/// Kind of signaling step a payload represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
    Hangup,
}

impl SignalKind {
    /// Classification order; the first match wins.
    pub const PRIORITY: [SignalKind; 4] = [
        SignalKind::Offer,
        SignalKind::Answer,
        SignalKind::IceCandidate,
        SignalKind::Hangup,
    ];

    /// Payload field name that marks this kind.
    pub fn field_name(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "iceCandidate",
            SignalKind::Hangup => "hangup",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_each_well_known_field() {
        // テスト項目: 既知のフィールドごとに正しい種別に分類される
        // given (前提条件):
        let cases = [
            (json!({"offer": {"type": "offer", "sdp": "v=0"}}), SignalKind::Offer),
            (json!({"answer": {"type": "answer"}}), SignalKind::Answer),
            (json!({"iceCandidate": {"candidate": "c"}}), SignalKind::IceCandidate),
            (json!({"hangup": true}), SignalKind::Hangup),
        ];

        for (value, expected) in cases {
            // when (操作):
            let kind = SignalingPayload::new(value).classify();

            // then (期待する結果):
            assert_eq!(kind, Some(expected));
        }
    }

    #[test]
    fn test_classify_uses_priority_order() {
        // テスト項目: 複数のフィールドを持つ場合は優先順位で最初の一致が選ばれる
        // given (前提条件):
        let payload = SignalingPayload::new(json!({
            "hangup": true,
            "iceCandidate": {},
            "answer": {},
        }));

        // when (操作):
        let kind = payload.classify();

        // then (期待する結果):
        assert_eq!(kind, Some(SignalKind::Answer));
    }

    #[test]
    fn test_classify_checks_presence_not_value() {
        // テスト項目: 値が null でもキーが存在すれば分類される
        // given (前提条件):
        let payload = SignalingPayload::new(json!({"offer": null}));

        // when (操作):
        let kind = payload.classify();

        // then (期待する結果):
        assert_eq!(kind, Some(SignalKind::Offer));
    }

    #[test]
    fn test_classify_unknown_payloads() {
        // テスト項目: 既知のフィールドを持たない、またはオブジェクトでないペイロードは未分類
        // given (前提条件):
        let payloads = [
            json!({"chat": "hello"}),
            json!({"Offer": "case matters"}),
            json!(["offer"]),
            json!("offer"),
            json!(42),
        ];

        for value in payloads {
            // when (操作):
            let kind = SignalingPayload::new(value).classify();

            // then (期待する結果):
            assert_eq!(kind, None);
        }
    }
}

//! Realtime event contract between Parley clients and the relay server.
//!
//! Every WebSocket text frame carries one [`Frame`]: an event name plus a JSON
//! payload. Event names are kebab-case on the wire; `connect` and
//! `connect_error` never cross the wire and are raised locally by a transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names.
pub mod event {
    /// out: announce a game participant (payload: username string)
    pub const JOIN_GAME: &str = "join-game";
    /// out: submit a free-form move (payload: move text string)
    pub const MAKE_MOVE: &str = "make-move";
    /// in: broadcast game event / log line (payload: string)
    pub const GAME_MESSAGE: &str = "game-message";
    /// out: announce a chat participant (payload: username string)
    pub const USER_JOINED: &str = "user-joined";
    /// out: announce a departure (payload: username string)
    pub const USER_LEFT: &str = "user-left";
    /// in/out: a directed chat message (payload: [`super::ChatMessagePayload`])
    pub const MESSAGE: &str = "message";
    /// Transport-local: the connection failed or dropped (payload: reason string).
    pub const CONNECT_ERROR: &str = "connect_error";
    /// Transport-local: the connection was (re)established (no payload).
    pub const CONNECT: &str = "connect";
}

/// One event on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Encode as a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a JSON text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Directed chat message as carried by the `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub sender: String,
    pub recipient: String,
    pub body: String,
    /// ISO-8601 timestamp, kept as sent
    pub sent_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_message_payload_uses_camel_case_sent_at() {
        // テスト項目: sentAt フィールドがキャメルケースでシリアライズされる
        // given (前提条件):
        let payload = ChatMessagePayload {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            body: "hi".to_string(),
            sent_at: "2024-01-01T00:00:00Z".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&payload).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "sender": "alice",
                "recipient": "bob",
                "body": "hi",
                "sentAt": "2024-01-01T00:00:00Z",
            })
        );
    }

    #[test]
    fn test_frame_decode_without_data_defaults_to_null() {
        // テスト項目: data を持たないフレームは null ペイロードとしてデコードされる
        // when (操作):
        let frame = Frame::from_json(r#"{"event":"connect"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(frame.event, event::CONNECT);
        assert_eq!(frame.data, Value::Null);
    }

    #[test]
    fn test_frame_decode_rejects_missing_event() {
        // テスト項目: event を持たないフレームはデコードエラーになる
        // when (操作):
        let result = Frame::from_json(r#"{"data":"hello"}"#);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_json_shape() {
        // テスト項目: フレームが {"event", "data"} 形式の JSON になる
        // given (前提条件):
        let frame = Frame::new(event::MAKE_MOVE, json!("e2e4"));

        // when (操作):
        let text = frame.to_json().unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"event": "make-move", "data": "e2e4"}));
    }
}

//! UseCase: イベント中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayEventUseCase::execute() メソッド
//! - 受信したイベントごとの配送先の選定と配送
//!
//! ### どのような状況を想定しているか
//! - 正常系：join-game / make-move のブロードキャスト、message の宛先配送と送信者へのエコー
//! - 異常系：不正なペイロード、未知のイベント
//! - エッジケース：宛先が未接続、自分宛てのメッセージ

use std::sync::Arc;

use parley_shared::protocol::{ChatMessagePayload, Frame, event};
use serde_json::Value;
use tokio::sync::Mutex;

use super::error::RelayError;
use crate::domain::{ConnectionId, Registry};

/// Name used in game broadcasts for connections that never joined.
const ANONYMOUS: &str = "anonymous";

/// イベント中継のユースケース
pub struct RelayEventUseCase {
    registry: Arc<Mutex<Registry>>,
}

impl RelayEventUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>) -> Self {
        Self { registry }
    }

    /// 1 つの受信フレームを処理して配送する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - フレームを配送した接続
    /// * `Err(RelayError)` - 中継しなかった理由
    pub async fn execute(
        &self,
        from: &ConnectionId,
        frame: Frame,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let mut registry = self.registry.lock().await;
        if registry.get(from).is_none() {
            return Err(RelayError::UnknownConnection(from.to_string()));
        }

        let (outbound, targets) = match frame.event.as_str() {
            event::JOIN_GAME => {
                let username = expect_string(&frame)?;
                registry.set_username(from, username.clone());
                let line = format!("{username} joined the game");
                (game_message(line), registry.ids())
            }
            event::MAKE_MOVE => {
                let text = expect_string(&frame)?;
                let player = registry.username_of(from).unwrap_or(ANONYMOUS);
                let line = format!("{player}: {text}");
                (game_message(line), registry.ids())
            }
            event::USER_JOINED => {
                let username = expect_string(&frame)?;
                tracing::info!("'{}' joined the chat on {}", username, from);
                registry.set_username(from, username);
                return Ok(Vec::new());
            }
            event::USER_LEFT => {
                let username = expect_string(&frame)?;
                tracing::info!("'{}' left the chat on {}", username, from);
                registry.clear_username(from, &username);
                return Ok(Vec::new());
            }
            event::MESSAGE => {
                let payload = serde_json::from_value::<ChatMessagePayload>(frame.data.clone())
                    .map_err(|e| invalid(&frame, e.to_string()))?;
                let mut targets = registry.ids_for_username(&payload.recipient);
                if targets.is_empty() {
                    tracing::debug!("No connection for recipient '{}'", payload.recipient);
                }
                // Echo to the sender so their own transcript shows the message.
                if !targets.contains(from) {
                    targets.push(*from);
                }
                (frame, targets)
            }
            other => return Err(RelayError::UnknownEvent(other.to_string())),
        };

        let text = outbound
            .to_json()
            .map_err(|e| RelayError::InvalidPayload {
                event: outbound.event.clone(),
                reason: e.to_string(),
            })?;

        let mut delivered = Vec::with_capacity(targets.len());
        for target in targets {
            match registry.get(&target) {
                Some(connection) if connection.send(text.clone()) => delivered.push(target),
                _ => tracing::warn!("Failed to send '{}' to {}", outbound.event, target),
            }
        }
        Ok(delivered)
    }
}

fn game_message(line: String) -> Frame {
    Frame::new(event::GAME_MESSAGE, Value::String(line))
}

fn expect_string(frame: &Frame) -> Result<String, RelayError> {
    match &frame.data {
        Value::String(text) => Ok(text.clone()),
        other => Err(invalid(frame, format!("expected a string, got {other}"))),
    }
}

fn invalid(frame: &Frame, reason: String) -> RelayError {
    RelayError::InvalidPayload {
        event: frame.event.clone(),
        reason,
    }
}

//! UseCase: 接続解除処理

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Registry};

/// 接続解除のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<Mutex<Registry>>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>) -> Self {
        Self { registry }
    }

    /// 接続を削除する
    ///
    /// # Returns
    ///
    /// 接続に紐づいていたユーザー名 (未参加なら None)
    pub async fn execute(&self, id: &ConnectionId) -> Option<String> {
        self.registry
            .lock()
            .await
            .unregister(id)
            .and_then(|connection| connection.username)
    }
}

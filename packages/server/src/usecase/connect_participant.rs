//! UseCase: 接続登録処理

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{Connection, ConnectionId, ConnectionIdFactory, Registry};

/// 接続登録のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<Mutex<Registry>>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>) -> Self {
        Self { registry }
    }

    /// 新しい接続を ID 付きで登録する
    ///
    /// ユーザー名は user-joined / join-game を受け取るまで未設定のまま。
    pub async fn execute(&self, sender: UnboundedSender<String>) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        self.registry
            .lock()
            .await
            .register(Connection::new(id, sender));
        id
    }
}

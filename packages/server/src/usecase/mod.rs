//! UseCase 層
//!
//! 接続の登録・解除とイベントの中継を実装するレイヤー。
//! UI 層 (WebSocket ハンドラ) から呼び出され、Domain 層 (Registry) を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod relay_event;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::RelayError;
pub use relay_event::RelayEventUseCase;

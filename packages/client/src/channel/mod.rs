//! Realtime channels.
//!
//! A channel wraps an injected [`Transport`](crate::domain::Transport) handle
//! and turns named events into local state. Channels never share hidden
//! global state: two channels use the same connection only when they were
//! given clones of the same `Arc`.

mod chat;
mod error;
mod game;

pub use chat::ChatChannel;
pub use error::ChannelError;
pub use game::GameChannel;

use crate::domain::ChatMessage;

/// What changed after an inbound event was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelUpdate {
    /// A game event line was appended to the transcript
    GameEvent(String),
    /// A chat message was appended to the transcript
    MessageReceived(ChatMessage),
    /// The connection failed and the join state was revoked; the user has to
    /// join again
    ConnectionLost { reason: String },
}

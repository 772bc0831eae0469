//! Core domain models for the realtime channels.

use parley_shared::protocol::ChatMessagePayload;

use super::value_object::Username;

/// Join state shared by the game and chat channels.
///
/// `Disconnected → Joining → Joined → Disconnected`. Only `Joined` permits
/// sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Disconnected,
    Joining,
    Joined,
}

impl ChannelState {
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Joined)
    }
}

/// The local participant's identity for the lifetime of one join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: Username,
}

impl Session {
    pub fn new(username: Username) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// A directed chat message, inbound or outbound.
///
/// Inbound messages are stored exactly as received, so none of the fields
/// are re-validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub recipient: String,
    pub body: String,
    /// ISO-8601 timestamp as produced by the sender
    pub sent_at: String,
}

impl From<ChatMessagePayload> for ChatMessage {
    fn from(payload: ChatMessagePayload) -> Self {
        Self {
            sender: payload.sender,
            recipient: payload.recipient,
            body: payload.body,
            sent_at: payload.sent_at,
        }
    }
}

impl From<ChatMessage> for ChatMessagePayload {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender,
            recipient: message.recipient,
            body: message.body,
            sent_at: message.sent_at,
        }
    }
}

/// Append-only, in-memory record of what the user has seen, in receipt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript<T> {
    entries: Vec<T>,
}

impl<T> Transcript<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T> Default for Transcript<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Game channel: join a game, submit free-form moves, collect broadcast
//! game events.
//!
//! The `game-message` listener is armed when the channel is mounted and stays
//! registered across transport reconnects until [`GameChannel::unmount`].
//! Events broadcast before the user joins are recorded as well.

use std::sync::Arc;

use parley_shared::protocol::event;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::{ChannelError, ChannelUpdate};
use crate::domain::{
    ChannelState, EventSink, InboundEvent, MoveText, Session, Transcript, Transport, Username,
};

/// Game variant of the realtime channel.
pub struct GameChannel {
    transport: Arc<dyn Transport>,
    state: ChannelState,
    session: Option<Session>,
    transcript: Transcript<String>,
    input: String,
    inbox_tx: EventSink,
    inbox: UnboundedReceiver<InboundEvent>,
    mounted: bool,
}

impl GameChannel {
    /// Create the channel and subscribe to `game-message` on `transport`.
    pub fn mount(transport: Arc<dyn Transport>) -> Self {
        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        transport.on(event::GAME_MESSAGE, inbox_tx.clone());
        tracing::debug!("Game channel mounted");

        Self {
            transport,
            state: ChannelState::Disconnected,
            session: None,
            transcript: Transcript::new(),
            input: String::new(),
            inbox_tx,
            inbox,
            mounted: true,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &Transcript<String> {
        &self.transcript
    }

    /// Pending move text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Announce the local player with `join-game`.
    ///
    /// No acknowledgement is awaited; the join is assumed to succeed once the
    /// transport accepts the frame.
    pub async fn join(&mut self, username: &str) -> Result<(), ChannelError> {
        let username = Username::new(username)?;
        if let Some(session) = &self.session {
            return Err(ChannelError::AlreadyJoined(
                session.username().as_str().to_string(),
            ));
        }

        self.state = ChannelState::Joining;
        if let Err(e) = self
            .transport
            .emit(event::JOIN_GAME, Value::String(username.as_str().to_string()))
            .await
        {
            tracing::warn!("Failed to join game as '{}': {}", username, e);
            self.state = ChannelState::Disconnected;
            return Err(e.into());
        }

        tracing::info!("Joined game as '{}'", username);
        self.session = Some(Session::new(username));
        self.state = ChannelState::Joined;
        Ok(())
    }

    /// Submit a move with `make-move`.
    ///
    /// The input buffer is cleared once the move passes validation, whether or
    /// not the transport accepts it.
    pub async fn send_move(&mut self, text: &str) -> Result<(), ChannelError> {
        let text = MoveText::new(text)?;
        if !self.state.is_joined() {
            return Err(ChannelError::NotJoined);
        }

        let result = self
            .transport
            .emit(event::MAKE_MOVE, Value::String(text.into_string()))
            .await;
        self.input.clear();

        result.map_err(|e| {
            tracing::warn!("Failed to send move: {}", e);
            e.into()
        })
    }

    /// Send the pending input buffer as a move.
    pub async fn submit_input(&mut self) -> Result<(), ChannelError> {
        let text = self.input.clone();
        self.send_move(&text).await
    }

    /// Apply one inbound event.
    pub fn handle_event(&mut self, inbound: InboundEvent) -> Option<ChannelUpdate> {
        match inbound.event.as_str() {
            event::GAME_MESSAGE => match inbound.payload {
                Value::String(line) => {
                    self.transcript.push(line.clone());
                    Some(ChannelUpdate::GameEvent(line))
                }
                other => {
                    tracing::warn!("Ignoring non-string game-message payload: {}", other);
                    None
                }
            },
            other => {
                tracing::debug!("Ignoring '{}' event on game channel", other);
                None
            }
        }
    }

    /// Wait for the next inbound event that changes something.
    pub async fn next_update(&mut self) -> Option<ChannelUpdate> {
        while let Some(inbound) = self.inbox.recv().await {
            if let Some(update) = self.handle_event(inbound) {
                return Some(update);
            }
        }
        None
    }

    /// Process every event already queued, without waiting.
    pub fn drain_updates(&mut self) -> Vec<ChannelUpdate> {
        let mut updates = Vec::new();
        while let Ok(inbound) = self.inbox.try_recv() {
            updates.extend(self.handle_event(inbound));
        }
        updates
    }

    /// Tear down the subscription and forget the session.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.transport.off(event::GAME_MESSAGE, &self.inbox_tx);
            self.mounted = false;
            tracing::debug!("Game channel unmounted");
        }
        self.session = None;
        self.state = ChannelState::Disconnected;
    }
}

impl Drop for GameChannel {
    fn drop(&mut self) {
        self.unmount();
    }
}

//! Chat channel: direct messages between named users.
//!
//! Listeners for `message` and `connect_error` exist only while joined. A
//! connection failure revokes the join (with a best-effort `user-left`) and
//! is reported as [`ChannelUpdate::ConnectionLost`]; rejoining is up to the
//! caller.

use std::sync::Arc;

use parley_shared::{
    protocol::{ChatMessagePayload, event},
    time::now_iso8601,
};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::{ChannelError, ChannelUpdate};
use crate::domain::{
    ChannelState, ChatMessage, EventSink, InboundEvent, MessageBody, Recipient, Session,
    Transcript, Transport, TransportError, Username,
};

/// Chat variant of the realtime channel.
pub struct ChatChannel {
    transport: Arc<dyn Transport>,
    state: ChannelState,
    session: Option<Session>,
    transcript: Transcript<ChatMessage>,
    recipient: String,
    body: String,
    inbox_tx: EventSink,
    inbox: UnboundedReceiver<InboundEvent>,
}

impl ChatChannel {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        Self {
            transport,
            state: ChannelState::Disconnected,
            session: None,
            transcript: Transcript::new(),
            recipient: String::new(),
            body: String::new(),
            inbox_tx,
            inbox,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &Transcript<ChatMessage> {
        &self.transcript
    }

    /// Pending recipient.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
    }

    /// Pending message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Announce the local user with `user-joined` and start listening.
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
            .emit(event::USER_JOINED, Value::String(username.as_str().to_string()))
            .await
        {
            tracing::warn!("Failed to join chat as '{}': {}", username, e);
            self.state = ChannelState::Disconnected;
            return Err(e.into());
        }

        self.transport.on(event::MESSAGE, self.inbox_tx.clone());
        self.transport.on(event::CONNECT_ERROR, self.inbox_tx.clone());

        tracing::info!("Joined chat as '{}'", username);
        self.session = Some(Session::new(username));
        self.state = ChannelState::Joined;
        Ok(())
    }

    /// Emit `user-left` and stop listening.
    ///
    /// Does nothing when not joined. The join state is revoked even if the
    /// transport refuses the `user-left` frame; that failure is only logged.
    /// Events still queued from this join are discarded.
    pub async fn leave(&mut self) {
        let Some(session) = self.session.take() else {
            self.state = ChannelState::Disconnected;
            return;
        };

        self.transport.off(event::MESSAGE, &self.inbox_tx);
        self.transport.off(event::CONNECT_ERROR, &self.inbox_tx);
        self.state = ChannelState::Disconnected;

        let mut discarded = 0;
        while self.inbox.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!("Discarded {} events queued before leaving", discarded);
        }

        let username = session.username().as_str().to_string();
        tracing::info!("Leaving chat as '{}'", username);
        if let Err(e) = self
            .transport
            .emit(event::USER_LEFT, Value::String(username))
            .await
        {
            tracing::warn!("Failed to announce departure: {}", e);
        }
    }

    /// Send a direct message stamped with the current time.
    ///
    /// Blank recipient or body: nothing is sent and the body buffer is kept.
    /// Otherwise the body buffer is cleared, whatever the transport says.
    pub async fn send_message(
        &mut self,
        recipient: &str,
        body: &str,
    ) -> Result<ChatMessage, ChannelError> {
        let recipient = Recipient::new(recipient)?;
        let body = MessageBody::new(body)?;
        let Some(session) = &self.session else {
            return Err(ChannelError::NotJoined);
        };

        let message = ChatMessage {
            sender: session.username().as_str().to_string(),
            recipient: recipient.into_string(),
            body: body.into_string(),
            sent_at: now_iso8601(),
        };

        let result = self.emit_message(&message).await;
        self.body.clear();

        match result {
            Ok(()) => {
                tracing::debug!("Sent message to '{}'", message.recipient);
                Ok(message)
            }
            Err(e) => {
                tracing::warn!("Failed to send message to '{}': {}", message.recipient, e);
                Err(e.into())
            }
        }
    }

    /// Send the pending recipient and body buffers. The recipient is kept
    /// for the next message.
    pub async fn submit_input(&mut self) -> Result<ChatMessage, ChannelError> {
        let recipient = self.recipient.clone();
        let body = self.body.clone();
        self.send_message(&recipient, &body).await
    }

    async fn emit_message(&self, message: &ChatMessage) -> Result<(), TransportError> {
        let payload = serde_json::to_value(ChatMessagePayload::from(message.clone()))
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.transport.emit(event::MESSAGE, payload).await
    }

    /// Apply one inbound event.
    pub async fn handle_event(&mut self, inbound: InboundEvent) -> Option<ChannelUpdate> {
        if !self.state.is_joined() {
            tracing::debug!("Dropping '{}' event received while not joined", inbound.event);
            return None;
        }

        match inbound.event.as_str() {
            event::MESSAGE => {
                match serde_json::from_value::<ChatMessagePayload>(inbound.payload) {
                    Ok(payload) => {
                        let message = ChatMessage::from(payload);
                        self.transcript.push(message.clone());
                        Some(ChannelUpdate::MessageReceived(message))
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring malformed message payload: {}", e);
                        None
                    }
                }
            }
            event::CONNECT_ERROR => {
                let reason = match inbound.payload {
                    Value::String(reason) => reason,
                    Value::Null => "connection failed".to_string(),
                    other => other.to_string(),
                };
                tracing::warn!("Connection failed while joined: {}", reason);
                self.leave().await;
                Some(ChannelUpdate::ConnectionLost { reason })
            }
            other => {
                tracing::debug!("Ignoring '{}' event on chat channel", other);
                None
            }
        }
    }

    /// Wait for the next inbound event that changes something.
    pub async fn next_update(&mut self) -> Option<ChannelUpdate> {
        while let Some(inbound) = self.inbox.recv().await {
            if let Some(update) = self.handle_event(inbound).await {
                return Some(update);
            }
        }
        None
    }

    /// Process every event already queued, without waiting.
    pub async fn drain_updates(&mut self) -> Vec<ChannelUpdate> {
        let mut updates = Vec::new();
        while let Ok(inbound) = self.inbox.try_recv() {
            updates.extend(self.handle_event(inbound).await);
        }
        updates
    }

    /// Leave (if still joined) and discard the channel.
    pub async fn unmount(mut self) {
        self.leave().await;
    }
}

impl Drop for ChatChannel {
    fn drop(&mut self) {
        if self.session.is_some() {
            // Cannot emit user-left from here; only detach the listeners.
            self.transport.off(event::MESSAGE, &self.inbox_tx);
            self.transport.off(event::CONNECT_ERROR, &self.inbox_tx);
        }
    }
}

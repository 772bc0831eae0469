//! Transport abstraction the channels depend on.
//!
//! Infrastructure provides the implementations (WebSocket, in-memory); the
//! channels only see this trait, so a transport handle can be injected and
//! shared deliberately.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// An event handed from the transport to a registered listener.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub event: String,
    pub payload: Value,
}

impl InboundEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

/// Where a transport delivers events for one listener.
pub type EventSink = UnboundedSender<InboundEvent>;

/// Errors surfaced when handing a frame to the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport has shut down and accepts no more frames
    #[error("transport is closed")]
    Closed,

    /// Too many frames are waiting for the connection to come back
    #[error("outbound queue is full ({capacity} frames)")]
    QueueFull { capacity: usize },

    /// The payload could not be encoded as a frame
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

/// Bidirectional named-event transport.
///
/// `emit` is fire-and-forget: `Ok` means the frame was accepted for delivery,
/// not that the peer received it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Queue `payload` under `event` for the peer.
    async fn emit(&self, event: &str, payload: Value) -> Result<(), TransportError>;

    /// Deliver every future `event` to `sink`.
    fn on(&self, event: &str, sink: EventSink);

    /// Stop delivering `event` to `sink`. Other listeners are unaffected.
    fn off(&self, event: &str, sink: &EventSink);
}

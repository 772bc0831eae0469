//! Domain layer for the realtime channels.
//!
//! Validation rules, the local session, the transcript and the transport
//! abstraction live here, independent of any concrete connection.

pub mod entity;
pub mod error;
pub mod transport;
pub mod value_object;

pub use entity::{ChannelState, ChatMessage, Session, Transcript};
pub use error::ValidationError;
pub use transport::{EventSink, InboundEvent, Transport, TransportError};
pub use value_object::{MessageBody, MoveText, Recipient, Username};

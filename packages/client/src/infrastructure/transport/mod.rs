//! Transport implementations.
//!
//! Both keep a [`ListenerRegistry`] and fan inbound events out to every sink
//! registered for the event name.

mod inmemory;
mod listener;
mod websocket;

pub use inmemory::InMemoryTransport;
pub use listener::ListenerRegistry;
pub use websocket::{
    DEFAULT_OUTBOUND_CAPACITY, DEFAULT_SERVER_URL, TransportOptions, WebSocketTransport,
};

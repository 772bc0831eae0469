//! Infrastructure layer: concrete transports.

pub mod transport;

pub use transport::{InMemoryTransport, TransportOptions, WebSocketTransport};

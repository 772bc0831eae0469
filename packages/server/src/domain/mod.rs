//! Domain layer for the relay server.
//!
//! Tracks which WebSocket connection speaks for which username.

pub mod entity;
pub mod factory;
pub mod value_object;

pub use entity::{Connection, Registry};
pub use factory::ConnectionIdFactory;
pub use value_object::ConnectionId;

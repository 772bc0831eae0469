//! UI layer: HTTP and WebSocket endpoints.

pub mod handler;
pub mod state;

//! Realtime game and chat channels.
//!
//! A [`GameChannel`] or [`ChatChannel`] wraps an injected
//! [`Transport`](domain::Transport) and turns the Parley event contract into
//! local state: join state, a transcript and pending input. The terminal
//! driver in [`ui`] is one consumer of that state.

pub mod channel;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub use channel::{ChannelError, ChannelUpdate, ChatChannel, GameChannel};
pub use config::{ClientArgs, Mode};
pub use infrastructure::{InMemoryTransport, TransportOptions, WebSocketTransport};
pub use ui::run_client;

//! Reference relay server for the Parley realtime event contract.
//!
//! Routes `message` events to the connections of their recipient (echoing
//! them to the sender) and turns `join-game` / `make-move` into
//! `game-message` broadcasts. Nothing is persisted.

pub mod config;
pub mod domain;
pub mod error;
mod runner;
pub mod ui;
pub mod usecase;

pub use config::ServerArgs;
pub use error::ServerError;
pub use runner::{build_router, run as run_server, serve};

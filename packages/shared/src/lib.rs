//! Shared pieces of the Parley workspace.
//!
//! Both the client channels and the relay server depend on this crate so that
//! event names and payload shapes are defined exactly once.

pub mod logger;
pub mod protocol;
pub mod time;

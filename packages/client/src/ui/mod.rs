//! Terminal driver for the channels.

mod command;
mod formatter;
mod runner;

pub use runner::{ClientError, run_client};

//! Server state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::Registry;

/// Shared application state
#[derive(Default)]
pub struct AppState {
    /// Live connections and the usernames bound to them
    pub registry: Arc<Mutex<Registry>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

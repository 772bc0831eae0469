//! Core domain models for the relay server.

use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;

use super::value_object::ConnectionId;

/// One live WebSocket connection.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    /// Set by `join-game` / `user-joined`, cleared by `user-left`
    pub username: Option<String>,
    /// Outbound text frames for this connection
    sender: UnboundedSender<String>,
}

impl Connection {
    pub fn new(id: ConnectionId, sender: UnboundedSender<String>) -> Self {
        Self {
            id,
            username: None,
            sender,
        }
    }

    /// Queue a text frame; false when the connection's writer is gone.
    pub fn send(&self, text: String) -> bool {
        self.sender.send(text).is_ok()
    }
}

/// Every connection currently attached to the server.
#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connection: Connection) {
        self.connections.insert(connection.id, connection);
    }

    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Bind `username` to a connection. Returns false for an unknown connection.
    pub fn set_username(&mut self, id: &ConnectionId, username: String) -> bool {
        match self.connections.get_mut(id) {
            Some(connection) => {
                connection.username = Some(username);
                true
            }
            None => false,
        }
    }

    /// Unbind `username` from a connection if it is the one bound there.
    pub fn clear_username(&mut self, id: &ConnectionId, username: &str) -> bool {
        match self.connections.get_mut(id) {
            Some(connection) if connection.username.as_deref() == Some(username) => {
                connection.username = None;
                true
            }
            _ => false,
        }
    }

    pub fn username_of(&self, id: &ConnectionId) -> Option<&str> {
        self.connections
            .get(id)
            .and_then(|connection| connection.username.as_deref())
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.connections.keys().copied().collect()
    }

    /// Connections currently bound to `username` (a user may be connected
    /// more than once).
    pub fn ids_for_username(&self, username: &str) -> Vec<ConnectionId> {
        self.connections
            .values()
            .filter(|connection| connection.username.as_deref() == Some(username))
            .map(|connection| connection.id)
            .collect()
    }
}

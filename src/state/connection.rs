//! Connection tracking.
//!
//! Maps transport connections to the player name they joined with, so a
//! disconnect can be turned into a real leave.

use std::collections::HashMap;
use std::time::Instant;

use thiserror::Error;

/// Transport connection identifier.
pub type ConnectionId = u64;

/// Errors binding a player to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),

    #[error("Connection already joined as {0}")]
    AlreadyJoined(String),
}

/// A single client connection.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,

    /// Player name bound by a successful join
    pub player: Option<String>,

    /// When this connection was established
    pub connected_at: Instant,

    /// Last activity timestamp
    pub last_activity: Instant,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        let now = Instant::now();
        Self {
            id,
            player: None,
            connected_at: now,
            last_activity: now,
        }
    }

    /// Record activity (any message received).
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Connection manager - tracks open connections and their players.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: HashMap<ConnectionId, Connection>,

    /// Player name to connection ID mapping
    players: HashMap<String, ConnectionId>,

    next_id: ConnectionId,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new connection and return its ID.
    pub fn open(&mut self) -> ConnectionId {
        self.next_id += 1;
        let id = self.next_id;
        self.connections.insert(id, Connection::new(id));
        id
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// Check that `id` is open and not yet bound to a player.
    pub fn check_bindable(&self, id: ConnectionId) -> Result<(), BindError> {
        let conn = self
            .connections
            .get(&id)
            .ok_or(BindError::UnknownConnection(id))?;
        match &conn.player {
            Some(player) => Err(BindError::AlreadyJoined(player.clone())),
            None => Ok(()),
        }
    }

    /// Bind a player name to an open, unbound connection.
    pub fn bind(&mut self, id: ConnectionId, player: &str) -> Result<(), BindError> {
        self.check_bindable(id)?;
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.touch();
            conn.player = Some(player.to_string());
        }
        self.players.insert(player.to_string(), id);
        Ok(())
    }

    /// Drop a player's binding, leaving the connection open.
    pub fn unbind_player(&mut self, player: &str) -> Option<ConnectionId> {
        let id = self.players.remove(player)?;
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.player = None;
        }
        Some(id)
    }

    /// Drop every binding.
    pub fn unbind_all(&mut self) {
        self.players.clear();
        for conn in self.connections.values_mut() {
            conn.player = None;
        }
    }

    /// Close a connection, returning the player it was bound to.
    pub fn close(&mut self, id: ConnectionId) -> Option<String> {
        let conn = self.connections.remove(&id)?;
        let player = conn.player?;
        self.players.remove(&player);
        Some(player)
    }

    pub fn player_for(&self, id: ConnectionId) -> Option<&str> {
        self.connections.get(&id)?.player.as_deref()
    }

    pub fn touch(&mut self, id: ConnectionId) {
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.touch();
        }
    }

    /// Count open connections.
    pub fn count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_assigns_ids() {
        let mut manager = ConnectionManager::new();
        let a = manager.open();
        let b = manager.open();

        assert_ne!(a, b);
        assert_eq!(manager.count(), 2);
        assert!(manager.get(a).unwrap().player.is_none());
    }

    #[test]
    fn test_bind_and_lookup() {
        let mut manager = ConnectionManager::new();
        let id = manager.open();

        manager.bind(id, "Alice").unwrap();
        assert_eq!(manager.player_for(id), Some("Alice"));
        assert_eq!(manager.bind(999, "Bob"), Err(BindError::UnknownConnection(999)));
    }

    #[test]
    fn test_bind_rejects_second_name() {
        let mut manager = ConnectionManager::new();
        let id = manager.open();
        manager.bind(id, "Alice").unwrap();

        assert_eq!(
            manager.bind(id, "Alicia"),
            Err(BindError::AlreadyJoined("Alice".to_string()))
        );
        assert_eq!(manager.player_for(id), Some("Alice"));
        assert_eq!(manager.close(id), Some("Alice".to_string()));
    }

    #[test]
    fn test_close_returns_player() {
        let mut manager = ConnectionManager::new();
        let bound = manager.open();
        let unbound = manager.open();
        manager.bind(bound, "Alice").unwrap();

        assert_eq!(manager.close(bound), Some("Alice".to_string()));
        assert_eq!(manager.close(unbound), None);
        assert_eq!(manager.close(bound), None);
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_unbind() {
        let mut manager = ConnectionManager::new();
        let a = manager.open();
        let b = manager.open();
        manager.bind(a, "A").unwrap();
        manager.bind(b, "B").unwrap();

        assert_eq!(manager.unbind_player("A"), Some(a));
        assert_eq!(manager.player_for(a), None);
        // Unbound connections can join again
        assert!(manager.check_bindable(a).is_ok());

        manager.unbind_all();
        assert_eq!(manager.player_for(b), None);
        assert_eq!(manager.count(), 2);
    }
}

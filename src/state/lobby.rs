//! Lobby roster management.
//!
//! The lobby is a single ordered roster of display names. Join order matters:
//! a player's position in the roster is their seat when cards are dealt.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::config::DEFAULT_LOBBY_CAPACITY;

/// Lobby errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("Username is required")]
    EmptyName,

    #[error("Lobby is full")]
    LobbyFull,

    #[error("Username already in the lobby")]
    DuplicateName,

    #[error("Invalid username")]
    UnknownPlayer,
}

/// Read-only copy of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSnapshot {
    /// Player names in join order
    pub players: Vec<String>,

    /// Whether a game has been started
    pub started: bool,

    /// Maximum players allowed
    pub capacity: usize,
}

impl RosterSnapshot {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Convert to JSON for sending to clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "players": self.players,
            "game_started": self.started,
            "max_players": self.capacity
        })
    }
}

/// Lobby state.
#[derive(Debug, Clone)]
pub struct Lobby {
    /// Player names in join order
    players: Vec<String>,

    /// Maximum players allowed
    pub capacity: usize,

    /// Whether a game has been started
    started: bool,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(DEFAULT_LOBBY_CAPACITY)
    }
}

impl Lobby {
    pub fn new(capacity: usize) -> Self {
        Self {
            players: Vec::new(),
            capacity,
            started: false,
        }
    }

    /// Append a player to the end of the roster.
    pub fn join(&mut self, name: &str) -> Result<RosterSnapshot, LobbyError> {
        if name.trim().is_empty() {
            return Err(LobbyError::EmptyName);
        }

        if self.is_full() {
            return Err(LobbyError::LobbyFull);
        }

        if self.has_player(name) {
            return Err(LobbyError::DuplicateName);
        }

        self.players.push(name.to_string());
        debug!(player = name, count = self.players.len(), "player joined lobby");

        Ok(self.snapshot())
    }

    /// Remove a player, keeping the others in order.
    pub fn leave(&mut self, name: &str) -> Result<RosterSnapshot, LobbyError> {
        let index = self
            .position(name)
            .ok_or(LobbyError::UnknownPlayer)?;
        self.players.remove(index);
        debug!(player = name, count = self.players.len(), "player left lobby");

        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            players: self.players.clone(),
            started: self.started,
            capacity: self.capacity,
        }
    }

    /// Clear the roster and the started flag.
    pub fn reset(&mut self) {
        self.players.clear();
        self.started = false;
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Roster position of a player (exact match).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p == name)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Player names in join order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

//! Outbound lobby events.
//!
//! These are the payloads fanned out to connected clients. Each serializes as
//! `{"event": "<name>", "data": {...}}`.

use std::fmt;

use serde::Serialize;

use super::lobby::RosterSnapshot;

/// Message returned by a reset.
pub const RESET_MESSAGE: &str = "Game has been reset";

/// Broadcast payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum LobbyEvent {
    PlayerJoined { players: Vec<String> },
    PlayerLeft { players: Vec<String> },
    GameStarted { players: Vec<String> },
    LobbyUpdate { players: Vec<String>, game_started: bool },
    Error { message: String },
}

impl LobbyEvent {
    pub fn player_joined(roster: &RosterSnapshot) -> Self {
        Self::PlayerJoined {
            players: roster.players.clone(),
        }
    }

    pub fn player_left(roster: &RosterSnapshot) -> Self {
        Self::PlayerLeft {
            players: roster.players.clone(),
        }
    }

    pub fn lobby_update(roster: &RosterSnapshot) -> Self {
        Self::LobbyUpdate {
            players: roster.players.clone(),
            game_started: roster.started,
        }
    }

    /// User-facing error notification.
    pub fn error(err: &impl fmt::Display) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "player_joined",
            Self::PlayerLeft { .. } => "player_left",
            Self::GameStarted { .. } => "game_started",
            Self::LobbyUpdate { .. } => "lobby_update",
            Self::Error { .. } => "error",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({ "event": self.name() }))
    }
}

/// Returned by a successful start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStartedEvent {
    /// Seat order used for the deal
    pub players: Vec<String>,

    /// Cards left in the deck after dealing
    pub deck_remaining: usize,
}

impl From<&GameStartedEvent> for LobbyEvent {
    fn from(event: &GameStartedEvent) -> Self {
        Self::GameStarted {
            players: event.players.clone(),
        }
    }
}

/// Returned by a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetAck {
    pub message: &'static str,
}

impl Default for ResetAck {
    fn default() -> Self {
        Self {
            message: RESET_MESSAGE,
        }
    }
}

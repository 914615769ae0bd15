//! Session controller.
//!
//! Owns the lobby and the game and is the only thing that mutates them. All
//! validation happens before any state changes, so a failed call leaves the
//! session exactly as it was.
//!
//! [`SessionHandle`] shares one controller between connections: mutations take
//! the write lock, queries take the read lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use super::config::{LobbyConfig, MIN_PLAYERS};
use super::deck::{DealError, Hand};
use super::events::{GameStartedEvent, ResetAck};
use super::game::Game;
use super::lobby::{Lobby, LobbyError, RosterSnapshot};
use super::phase::{PhaseEvent, SessionPhase};

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Lobby(#[from] LobbyError),

    #[error(transparent)]
    Deal(#[from] DealError),

    #[error("Game already started")]
    AlreadyStarted,

    #[error("At least 2 players are required to start the game")]
    NotEnoughPlayers,

    #[error("Game has not started")]
    NotStarted,

    #[error("Player was not dealt into this game")]
    UnknownPlayer,
}

/// Lobby + game for one table.
#[derive(Debug)]
pub struct SessionController {
    lobby: Lobby,
    game: Game,
    phase: SessionPhase,
    rng: StdRng,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(LobbyConfig::default())
    }
}

impl SessionController {
    pub fn new(config: LobbyConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            lobby: Lobby::new(config.capacity),
            game: Game::new(),
            phase: SessionPhase::Waiting,
            rng,
        }
    }

    /// Add a player. Only allowed before the game starts.
    pub fn join(&mut self, name: &str) -> Result<RosterSnapshot, SessionError> {
        if self.phase.is_started() {
            return Err(SessionError::AlreadyStarted);
        }

        Ok(self.lobby.join(name)?)
    }

    /// Remove a player. Already-dealt hands are left as they are.
    pub fn leave(&mut self, name: &str) -> Result<RosterSnapshot, SessionError> {
        let roster = self.lobby.leave(name)?;
        if self.phase.is_started() {
            debug!(player = name, "player left after deal; hand retained");
        }
        Ok(roster)
    }

    /// Build, shuffle and deal for the current roster.
    pub fn start(&mut self) -> Result<GameStartedEvent, SessionError> {
        let next = self
            .phase
            .transition(PhaseEvent::Start)
            .map_err(|_| SessionError::AlreadyStarted)?;

        if self.lobby.player_count() < MIN_PLAYERS {
            return Err(SessionError::NotEnoughPlayers);
        }

        let game = Game::deal(self.lobby.players(), &mut self.rng)?;
        self.phase = next;
        self.game = game;
        self.lobby.mark_started();

        info!(
            players = self.game.player_count,
            deck_remaining = self.game.deck.len(),
            "game started"
        );

        Ok(GameStartedEvent {
            players: self.game.seating().to_vec(),
            deck_remaining: self.game.deck.len(),
        })
    }

    /// Clear the lobby and game and return to waiting.
    pub fn reset(&mut self) -> ResetAck {
        let was = self.phase;
        self.phase = self.phase.transition(PhaseEvent::Reset).unwrap_or_default();
        self.lobby.reset();
        self.game = Game::new();

        info!(from = %was, "session reset");
        ResetAck::default()
    }

    /// Hand dealt to `name`, looked up through the seating frozen at deal time.
    pub fn hand(&self, name: &str) -> Result<Hand, SessionError> {
        if !self.phase.is_started() {
            return Err(SessionError::NotStarted);
        }

        self.game
            .hand(name)
            .cloned()
            .ok_or(SessionError::UnknownPlayer)
    }

    pub fn roster(&self) -> RosterSnapshot {
        self.lobby.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Convert full session state to JSON (hands excluded).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "phase": self.phase.as_str(),
            "lobby": self.lobby.snapshot().to_json(),
            "game": self.game.to_json()
        })
    }
}

/// Shared handle to one session controller.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionController>>,
}

impl SessionHandle {
    pub fn new(controller: SessionController) -> Self {
        Self {
            inner: Arc::new(RwLock::new(controller)),
        }
    }

    pub fn from_config(config: LobbyConfig) -> Self {
        Self::new(SessionController::new(config))
    }

    // Validation precedes every mutation, so state behind a poisoned lock is consistent.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, SessionController> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, SessionController> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn join(&self, name: &str) -> Result<RosterSnapshot, SessionError> {
        self.write().join(name)
    }

    pub fn leave(&self, name: &str) -> Result<RosterSnapshot, SessionError> {
        self.write().leave(name)
    }

    pub fn start(&self) -> Result<GameStartedEvent, SessionError> {
        self.write().start()
    }

    pub fn reset(&self) -> ResetAck {
        self.write().reset()
    }

    pub fn hand(&self, name: &str) -> Result<Hand, SessionError> {
        self.read().hand(name)
    }

    pub fn roster(&self) -> RosterSnapshot {
        self.read().roster()
    }

    pub fn phase(&self) -> SessionPhase {
        self.read().phase()
    }
}

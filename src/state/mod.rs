//! State management module for the card lobby.
//!
//! This module provides the core state types:
//!
//! - `config` - Lobby capacity and shuffle seeding
//! - `deck` - Role cards, deck building, shuffling and dealing
//! - `lobby` - Ordered roster with capacity and name uniqueness
//! - `phase` - Waiting/Started state machine
//! - `game` - Dealt hands bound to the seating frozen at deal time
//! - `session` - Controller that owns lobby + game, and its shared handle
//! - `events` - Outbound broadcast payloads
//! - `connection` - Connection to player-name tracking
//! - `gateway` - Request dispatch and event fan-out
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            Gateway                               │
//! │                                                                  │
//! │  ┌───────────────────┐        ┌──────────────────────────────┐  │
//! │  │ ConnectionManager │        │ broadcast::Sender<LobbyEvent>│  │
//! │  │ conn → player     │        │ player_joined / player_left  │  │
//! │  │ player → conn     │        │ game_started / lobby_update  │  │
//! │  └───────────────────┘        └──────────────────────────────┘  │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │        SessionHandle = Arc<RwLock<SessionController>>       │ │
//! │  │                                                             │ │
//! │  │   Lobby (roster, started)     Game (deck, seating, hands)   │ │
//! │  │                                                             │ │
//! │  │        Waiting ──start──▶ Started ──reset──▶ Waiting        │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod connection;
pub mod deck;
pub mod events;
pub mod game;
pub mod gateway;
pub mod lobby;
pub mod phase;
pub mod session;

// Re-export commonly used types
pub use config::{LobbyConfig, DEFAULT_LOBBY_CAPACITY, MIN_PLAYERS};
pub use connection::{BindError, Connection, ConnectionId, ConnectionManager};
pub use deck::{copies_for, DealError, Deck, Hand, Role, HAND_SIZE, MAX_SUPPORTED_PLAYERS, ROLES};
pub use events::{GameStartedEvent, LobbyEvent, ResetAck, RESET_MESSAGE};
pub use game::Game;
pub use gateway::{Gateway, GatewayError, Request};
pub use lobby::{Lobby, LobbyError, RosterSnapshot};
pub use phase::{InvalidTransition, PhaseEvent, SessionPhase};
pub use session::{SessionController, SessionError, SessionHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_lifecycle() {
        let gateway = Gateway::from_config(LobbyConfig::new().with_seed(Some(21)));
        let mut rx = gateway.subscribe();

        let conns: Vec<ConnectionId> = (0..3).map(|_| gateway.connect()).collect();
        for (conn, name) in conns.iter().zip(["A", "B", "C"]) {
            gateway.join(*conn, name).unwrap();
        }

        let started = gateway.start().unwrap();
        assert_eq!(started.deck_remaining, 9);
        for name in ["A", "B", "C"] {
            assert_eq!(gateway.hand(name).unwrap().len(), HAND_SIZE);
        }

        gateway.reset();
        assert_eq!(gateway.session().phase(), SessionPhase::Waiting);
        assert!(gateway.roster().is_empty());

        let names: Vec<&str> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.name())
            .collect();
        assert_eq!(
            names,
            vec!["player_joined", "player_joined", "player_joined", "game_started", "lobby_update"]
        );
    }
}

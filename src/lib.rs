//! Card Lobby State Library
//!
//! This crate provides the lobby and dealing state for a multiplayer role-card
//! game.
//!
//! # Overview
//!
//! - **Lobby** - An ordered roster of unique display names with a capacity.
//!   Join order is seat order.
//!
//! - **Session** - A Waiting → Started → (reset) → Waiting state machine that
//!   owns the lobby and the game and is the only thing that mutates them.
//!
//! - **Deck** - Five roles repeated a number of times that grows with the
//!   player count, shuffled uniformly and dealt two cards per player.
//!
//! - **Gateway** - Maps connections to players, dispatches requests and
//!   broadcasts lobby events to subscribers.
//!
//! # Design Principles
//!
//! 1. **Validate, then mutate** - A rejected call never leaves partial state.
//!
//! 2. **One writer at a time** - The session sits behind a read/write lock;
//!    joins, leaves, starts and resets are serialized.
//!
//! 3. **No networking** - This crate is pure state, no WebSocket or HTTP.
//!
//! 4. **Serialization-ready** - Events and snapshots convert to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use card_lobby::{Gateway, LobbyConfig, LobbyEvent, HAND_SIZE};
//!
//! let gateway = Gateway::from_config(LobbyConfig::new().with_seed(Some(1)));
//! let mut events = gateway.subscribe();
//!
//! for name in ["A", "B", "C"] {
//!     let conn = gateway.connect();
//!     gateway.join(conn, name).unwrap();
//! }
//!
//! let started = gateway.start().unwrap();
//! assert_eq!(started.deck_remaining, 9);
//! assert_eq!(gateway.hand("B").unwrap().len(), HAND_SIZE);
//!
//! let first = events.try_recv().unwrap();
//! assert_eq!(first, LobbyEvent::PlayerJoined { players: vec!["A".to_string()] });
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;

//! In-process event gateway.
//!
//! Sits between a transport and the session: resolves connections to player
//! names, forwards requests to the [`SessionHandle`], and fans out lobby events
//! to every subscriber. Broadcasts are fire-and-forget; a send with no
//! listeners never affects the state change that produced it.
//!
//! Locks are always taken connections first, then session. Events are sent
//! while the connections lock is held so they go out in the order the
//! mutations were applied.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use super::config::LobbyConfig;
use super::connection::{BindError, ConnectionId, ConnectionManager};
use super::deck::Hand;
use super::events::{GameStartedEvent, LobbyEvent, ResetAck};
use super::lobby::RosterSnapshot;
use super::session::{SessionError, SessionHandle};

/// Buffered events per subscriber before the oldest are dropped.
pub const EVENT_BUFFER: usize = 256;

/// Gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Connection(#[from] BindError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Inbound client requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Join { username: String },
    Leave { username: String },
    Start,
    Reset,
    Lobby,
    Hand { username: String },
    PingLobby,
}

/// Event gateway for one session.
#[derive(Debug)]
pub struct Gateway {
    session: SessionHandle,
    connections: Mutex<ConnectionManager>,
    events: broadcast::Sender<LobbyEvent>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(SessionHandle::default())
    }
}

impl Gateway {
    pub fn new(session: SessionHandle) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            session,
            connections: Mutex::new(ConnectionManager::new()),
            events,
        }
    }

    pub fn from_config(config: LobbyConfig) -> Self {
        Self::new(SessionHandle::from_config(config))
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Receive every broadcast from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LobbyEvent> {
        self.events.subscribe()
    }

    fn connections(&self) -> MutexGuard<'_, ConnectionManager> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, event: LobbyEvent) {
        let name = event.name();
        match self.events.send(event) {
            Ok(receivers) => trace!(event = name, receivers, "broadcast"),
            Err(_) => trace!(event = name, "broadcast with no subscribers"),
        }
    }

    /// Register a new transport connection.
    pub fn connect(&self) -> ConnectionId {
        let id = self.connections().open();
        debug!(connection = id, "client connected");
        id
    }

    /// Join as `name` and bind the name to `conn`.
    ///
    /// The connection must be open and not already bound to a player.
    pub fn join(&self, conn: ConnectionId, name: &str) -> Result<RosterSnapshot, GatewayError> {
        let mut connections = self.connections();
        connections.check_bindable(conn)?;
        let roster = self.session.join(name)?;
        connections.bind(conn, name)?;

        self.broadcast(LobbyEvent::player_joined(&roster));
        Ok(roster)
    }

    /// Remove `name` from the lobby.
    pub fn leave(&self, name: &str) -> Result<RosterSnapshot, SessionError> {
        let mut connections = self.connections();
        let roster = self.session.leave(name)?;
        connections.unbind_player(name);

        self.broadcast(LobbyEvent::player_left(&roster));
        Ok(roster)
    }

    /// Close `conn`; its bound player, if any, leaves the lobby.
    pub fn disconnect(&self, conn: ConnectionId) -> Option<RosterSnapshot> {
        let mut connections = self.connections();
        let Some(player) = connections.close(conn) else {
            debug!(connection = conn, "client disconnected");
            return None;
        };

        match self.session.leave(&player) {
            Ok(roster) => {
                info!(connection = conn, player = %player, "player disconnected");
                self.broadcast(LobbyEvent::player_left(&roster));
                Some(roster)
            }
            Err(err) => {
                debug!(connection = conn, player = %player, %err, "disconnected player already gone");
                None
            }
        }
    }

    pub fn start(&self) -> Result<GameStartedEvent, SessionError> {
        let _connections = self.connections();
        let started = self.session.start()?;

        self.broadcast(LobbyEvent::from(&started));
        Ok(started)
    }

    /// Reset the session and drop every player binding.
    pub fn reset(&self) -> ResetAck {
        let mut connections = self.connections();
        let (ack, roster) = {
            let mut session = self.session.write();
            (session.reset(), session.roster())
        };
        connections.unbind_all();

        self.broadcast(LobbyEvent::lobby_update(&roster));
        ack
    }

    pub fn hand(&self, name: &str) -> Result<Hand, SessionError> {
        self.session.hand(name)
    }

    pub fn roster(&self) -> RosterSnapshot {
        self.session.roster()
    }

    /// Lobby state for the asking client only.
    pub fn ping_lobby(&self, conn: ConnectionId) -> LobbyEvent {
        self.connections().touch(conn);
        LobbyEvent::lobby_update(&self.session.roster())
    }

    /// Handle one request from `conn`, returning the direct reply.
    ///
    /// Failures come back as an `error` event; they never reach other clients.
    pub fn dispatch(&self, conn: ConnectionId, request: Request) -> serde_json::Value {
        let result = match request {
            Request::Join { username } => self.join(conn, &username).map(|r| r.to_json()),
            Request::Leave { username } => self
                .leave(&username)
                .map(|r| r.to_json())
                .map_err(GatewayError::from),
            Request::Start => self
                .start()
                .map(|_| serde_json::json!({ "message": "Game started" }))
                .map_err(GatewayError::from),
            Request::Reset => Ok(serde_json::json!({ "message": self.reset().message })),
            Request::Lobby => Ok(serde_json::json!({ "players": self.roster().players })),
            Request::Hand { username } => self
                .hand(&username)
                .map(|hand| serde_json::json!({ "hand": hand }))
                .map_err(GatewayError::from),
            Request::PingLobby => Ok(self.ping_lobby(conn).to_json()),
        };

        result.unwrap_or_else(|err| {
            debug!(connection = conn, %err, "request rejected");
            LobbyEvent::error(&err).to_json()
        })
    }
}

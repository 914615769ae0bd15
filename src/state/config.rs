//! Lobby configuration.
//!
//! Defaults match the fixed table rules; the environment can override them for
//! local play or reproducible test runs.

use tracing::warn;

use super::deck::MAX_SUPPORTED_PLAYERS;

/// Default maximum players in the lobby.
pub const DEFAULT_LOBBY_CAPACITY: usize = 14;

/// Minimum players needed to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Lobby configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Maximum roster size
    pub capacity: usize,

    /// Fixed shuffle seed (entropy-seeded when `None`)
    pub shuffle_seed: Option<u64>,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LOBBY_CAPACITY,
            shuffle_seed: None,
        }
    }
}

impl LobbyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `LOBBY_CAPACITY` and `LOBBY_SHUFFLE_SEED`, falling back to defaults.
    pub fn from_env() -> Self {
        let capacity = read_usize("LOBBY_CAPACITY", DEFAULT_LOBBY_CAPACITY);
        let shuffle_seed = std::env::var("LOBBY_SHUFFLE_SEED")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok());

        Self::new().with_capacity(capacity).with_seed(shuffle_seed)
    }

    /// Set the capacity, clamped to what a deck can serve.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        let clamped = capacity.clamp(MIN_PLAYERS, MAX_SUPPORTED_PLAYERS);
        if clamped != capacity {
            warn!(
                requested = capacity,
                capacity = clamped,
                "lobby capacity out of range, clamping"
            );
        }
        self.capacity = clamped;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }
}

fn read_usize(key: &str, fallback: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = LobbyConfig::default();
        assert_eq!(config.capacity, 14);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn test_capacity_clamped() {
        assert_eq!(LobbyConfig::new().with_capacity(40).capacity, MAX_SUPPORTED_PLAYERS);
        assert_eq!(LobbyConfig::new().with_capacity(0).capacity, MIN_PLAYERS);
        assert_eq!(LobbyConfig::new().with_capacity(8).capacity, 8);
    }

    #[test]
    fn test_from_env() {
        // Only this test touches these variables.
        std::env::remove_var("LOBBY_CAPACITY");
        std::env::remove_var("LOBBY_SHUFFLE_SEED");
        assert_eq!(LobbyConfig::from_env(), LobbyConfig::default());

        std::env::set_var("LOBBY_CAPACITY", "6");
        std::env::set_var("LOBBY_SHUFFLE_SEED", "99");
        let config = LobbyConfig::from_env();
        assert_eq!(config.capacity, 6);
        assert_eq!(config.shuffle_seed, Some(99));

        std::env::set_var("LOBBY_CAPACITY", "100");
        assert_eq!(LobbyConfig::from_env().capacity, MAX_SUPPORTED_PLAYERS);

        std::env::set_var("LOBBY_CAPACITY", "lots");
        std::env::set_var("LOBBY_SHUFFLE_SEED", "-1");
        let config = LobbyConfig::from_env();
        assert_eq!(config.capacity, DEFAULT_LOBBY_CAPACITY);
        assert_eq!(config.shuffle_seed, None);

        std::env::remove_var("LOBBY_CAPACITY");
        std::env::remove_var("LOBBY_SHUFFLE_SEED");
    }

    #[test]
    fn test_with_seed() {
        let config = LobbyConfig::new().with_seed(Some(7));
        assert_eq!(config.shuffle_seed, Some(7));
    }
}

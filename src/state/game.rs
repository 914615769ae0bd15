//! Game state management.
//!
//! A game is created when the lobby starts: the deck is built for the current
//! roster, shuffled, and two cards are dealt to every seat. The roster used for
//! the deal is frozen as the seating so hands stay bound to names even if the
//! lobby changes afterwards.

use rand::Rng;

use super::deck::{DealError, Deck, Hand};

/// Game session state.
#[derive(Debug, Clone, Default)]
pub struct Game {
    /// Current turn index into the seating
    pub current_turn_index: usize,

    /// Number of seats dealt
    pub player_count: usize,

    /// Undealt cards
    pub deck: Deck,

    /// Roster frozen at deal time (seat order)
    seating: Vec<String>,

    /// Hands indexed by seat
    hands: Vec<Hand>,

    /// When the hands were dealt
    pub dealt_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Game {
    /// Empty game (no cards, no seats).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build, shuffle and deal a game for `roster`.
    ///
    /// Returns a fully dealt game or an error; nothing is partially built.
    pub fn deal<R: Rng + ?Sized>(roster: &[String], rng: &mut R) -> Result<Self, DealError> {
        let player_count = roster.len();
        let mut deck = Deck::build(player_count)?;
        deck.shuffle(rng);
        let hands = deck.deal(player_count)?;

        Ok(Self {
            current_turn_index: 0,
            player_count,
            deck,
            seating: roster.to_vec(),
            hands,
            dealt_at: Some(chrono::Utc::now()),
        })
    }

    /// Check if hands have been dealt.
    pub fn is_dealt(&self) -> bool {
        self.dealt_at.is_some()
    }

    /// Seat index of a player at deal time.
    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.seating.iter().position(|p| p == name)
    }

    /// Hand dealt to a player, looked up through the frozen seating.
    pub fn hand(&self, name: &str) -> Option<&Hand> {
        self.seat_of(name).and_then(|seat| self.hands.get(seat))
    }

    /// Player names in seat order.
    pub fn seating(&self) -> &[String] {
        &self.seating
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Name of the player whose turn it is.
    pub fn current_player(&self) -> Option<&str> {
        self.seating
            .get(self.current_turn_index)
            .map(String::as_str)
    }

    /// Convert to JSON. Hands are private and never included.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "current_turn": self.current_player(),
            "current_turn_index": self.current_turn_index,
            "player_count": self.player_count,
            "seating": self.seating,
            "deck_remaining": self.deck.len(),
            "dealt_at": self.dealt_at
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::deck::HAND_SIZE;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_game_new() {
        let game = Game::new();
        assert!(!game.is_dealt());
        assert_eq!(game.player_count, 0);
        assert!(game.hands().is_empty());
        assert!(game.deck.is_empty());
    }

    #[test]
    fn test_deal_three_players() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::deal(&roster(&["A", "B", "C"]), &mut rng).unwrap();

        assert!(game.is_dealt());
        assert_eq!(game.player_count, 3);
        assert_eq!(game.hands().len(), 3);
        assert!(game.hands().iter().all(|h| h.len() == HAND_SIZE));
        assert_eq!(game.deck.len(), 9);
        assert_eq!(game.current_player(), Some("A"));
    }

    #[test]
    fn test_hand_lookup_by_seat() {
        let mut rng = StdRng::seed_from_u64(2);
        let game = Game::deal(&roster(&["A", "B"]), &mut rng).unwrap();

        assert_eq!(game.seat_of("B"), Some(1));
        assert_eq!(game.hand("B"), Some(&game.hands()[1]));
        assert_eq!(game.hand("Z"), None);
    }

    #[test]
    fn test_deal_rejects_single_player() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = Game::deal(&roster(&["A"]), &mut rng);
        assert_eq!(result.unwrap_err(), DealError::InsufficientPlayers);
    }

    #[test]
    fn test_deal_rejects_oversized_roster() {
        let mut rng = StdRng::seed_from_u64(4);
        let names: Vec<String> = (0..16).map(|i| format!("P{}", i)).collect();
        let result = Game::deal(&names, &mut rng);
        assert_eq!(result.unwrap_err(), DealError::TooManyPlayers(16));
    }

    #[test]
    fn test_to_json_hides_hands() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = Game::deal(&roster(&["A", "B"]), &mut rng).unwrap();
        let json = game.to_json();

        assert_eq!(json["deck_remaining"], 11);
        assert_eq!(json["current_turn"], "A");
        assert!(json.get("hands").is_none());
    }
}

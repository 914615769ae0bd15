//! Role cards, deck construction, shuffling and the initial deal.
//!
//! A deck is `copies` full cycles of the five roles, where `copies` grows with
//! the number of seated players. Dealing takes cards from the front of the
//! deck, one per player per round, for [`HAND_SIZE`] rounds.

use std::collections::VecDeque;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cards dealt to each player at game start.
pub const HAND_SIZE: usize = 2;

/// Largest player count the copy table covers.
pub const MAX_SUPPORTED_PLAYERS: usize = 15;

/// A role card. Equality is by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Captain,
    Assassin,
    Duke,
    Contessa,
    Ambassador,
}

/// The role vocabulary in its natural (unshuffled) order.
pub const ROLES: [Role; 5] = [
    Role::Captain,
    Role::Assassin,
    Role::Duke,
    Role::Contessa,
    Role::Ambassador,
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Captain => "Captain",
            Self::Assassin => "Assassin",
            Self::Duke => "Duke",
            Self::Contessa => "Contessa",
            Self::Ambassador => "Ambassador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deck construction and dealing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("At least 2 players are required to build a deck")]
    InsufficientPlayers,

    #[error("Too many players for one deck ({0}, maximum is 15)")]
    TooManyPlayers(usize),

    #[error("Not enough cards to deal: need {needed}, deck has {available}")]
    InsufficientCards { needed: usize, available: usize },
}

/// Number of role cycles in the deck for a given player count.
pub fn copies_for(player_count: usize) -> Result<usize, DealError> {
    match player_count {
        0 | 1 => Err(DealError::InsufficientPlayers),
        2..=6 => Ok(3),
        7..=9 => Ok(4),
        10..=11 => Ok(5),
        12..=13 => Ok(6),
        14..=15 => Ok(7),
        n => Err(DealError::TooManyPlayers(n)),
    }
}

/// A player's hand, in deal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<Role>);

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Role] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, role: Role) {
        self.0.push(role);
    }
}

/// An ordered deck. The front is the next card dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Role>,
}

impl Deck {
    /// Build an unshuffled deck sized for `player_count` players.
    pub fn build(player_count: usize) -> Result<Self, DealError> {
        let copies = copies_for(player_count)?;
        let cards = std::iter::repeat(ROLES)
            .take(copies)
            .flatten()
            .collect();
        Ok(Self { cards })
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Role>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Role> {
        self.cards.iter()
    }

    /// Uniformly permute the deck in place (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Deal [`HAND_SIZE`] rounds to `player_count` seats.
    ///
    /// Each round gives one card to every seat in ascending order. Cards not
    /// dealt stay in the deck. Nothing is taken if the deck is too short.
    pub fn deal(&mut self, player_count: usize) -> Result<Vec<Hand>, DealError> {
        let available = self.cards.len();
        let needed = HAND_SIZE
            .checked_mul(player_count)
            .ok_or(DealError::InsufficientCards {
                needed: usize::MAX,
                available,
            })?;
        if available < needed {
            return Err(DealError::InsufficientCards { needed, available });
        }

        let mut hands = vec![Hand::new(); player_count];
        for _ in 0..HAND_SIZE {
            for hand in hands.iter_mut() {
                if let Some(card) = self.cards.pop_front() {
                    hand.push(card);
                }
            }
        }

        Ok(hands)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "remaining": self.cards.len() })
    }
}

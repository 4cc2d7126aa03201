//! Seats and the players sitting in them.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seat order is fixed for the whole game.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A name, a hand of cards and a one-way eliminated flag. Counts and point
//! totals are derived from the hand on every read, never stored.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::error::GameError;
use crate::cards::{Card, CardKind};

/// Seat identifier. Indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use bomb_deck::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

/// Seats are shown 1-based, matching default player names.
impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-seat data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Wrap one value per seat, in seat order.
    ///
    /// Fails if there are no seats or more than a `u8` can address.
    pub fn from_vec(data: Vec<T>) -> Result<Self, GameError> {
        if data.is_empty() {
            return Err(GameError::config("must have at least 1 player"));
        }
        if data.len() > usize::from(u8::MAX) {
            return Err(GameError::config("at most 255 players supported"));
        }
        Ok(Self { data })
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data, or `None` for a seat outside the table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Hands rarely grow past a handful of cards before a bomb ends them.
pub type Hand = SmallVec<[Card; 8]>;

/// A player at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Hand,
    eliminated: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            eliminated: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Active players are the ones still in the game.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove and return the card at `index`.
    pub fn remove_card_at(&mut self, index: usize) -> Result<Card, GameError> {
        if index >= self.hand.len() {
            return Err(GameError::IndexOutOfRange {
                index,
                len: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    /// Index of the first card of `kind` in hand.
    #[must_use]
    pub fn position_of(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.is(kind))
    }

    /// Empty the hand, returning what was in it.
    pub fn clear_hand(&mut self) -> Vec<Card> {
        self.hand.drain(..).collect()
    }

    /// One-way: a player is never un-eliminated.
    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    /// Sum of point-card values in hand.
    #[must_use]
    pub fn point_total(&self) -> u32 {
        self.hand.iter().map(Card::scoring_points).sum()
    }

    #[must_use]
    pub fn skip_turn_count(&self) -> usize {
        self.count_of(CardKind::SkipTurn)
    }

    #[must_use]
    pub fn defuser_count(&self) -> usize {
        self.count_of(CardKind::Defuser)
    }

    #[must_use]
    pub fn count_of(&self, kind: CardKind) -> usize {
        self.hand.iter().filter(|c| c.is(kind)).count()
    }

    /// Derived stats for display.
    #[must_use]
    pub fn stats(&self, id: PlayerId) -> PlayerStats {
        PlayerStats {
            id,
            name: self.name.clone(),
            card_count: self.card_count(),
            point_total: self.point_total(),
            skip_turn_count: self.skip_turn_count(),
            defuser_count: self.defuser_count(),
            eliminated: self.eliminated,
        }
    }
}

/// Read-only view of a player, as rendered by a front end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub card_count: usize,
    pub point_total: u32,
    pub skip_turn_count: usize,
    pub defuser_count: usize,
    pub eliminated: bool,
}

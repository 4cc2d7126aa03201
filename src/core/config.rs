//! Game configuration types.
//!
//! - `DeckComposition`: how many cards of each kind the deck holds
//! - `GameConfig`: seat names, composition and seed for one game
//!
//! Both are plain serde structs with builder-style setters. `validate` is run
//! by `GameEngine::new` before any cards are dealt.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::cards::{CardKind, DEFAULT_POINTS};

/// Fewest seats a game can start with.
pub const MIN_PLAYERS: usize = 2;
/// Most seats a game can start with.
pub const MAX_PLAYERS: usize = 8;

/// Number of cards of each kind in a fresh deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    pub bombs: usize,
    pub defusers: usize,
    pub skip_turns: usize,
    pub point_cards: usize,
    /// Value printed on every card.
    pub point_value: u32,
}

impl DeckComposition {
    /// The 60-card deck: 6 bombs, 6 defusers, 10 skip turns, 38 point cards.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            bombs: 6,
            defusers: 6,
            skip_turns: 10,
            point_cards: 38,
            point_value: DEFAULT_POINTS,
        }
    }

    /// Number of cards of `kind`.
    #[must_use]
    pub const fn count(&self, kind: CardKind) -> usize {
        match kind {
            CardKind::Bomb => self.bombs,
            CardKind::Defuser => self.defusers,
            CardKind::SkipTurn => self.skip_turns,
            CardKind::PointCard => self.point_cards,
        }
    }

    /// Total number of cards.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.bombs + self.defusers + self.skip_turns + self.point_cards
    }
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything needed to start a game.
///
/// ```
/// use bomb_deck::core::GameConfig;
///
/// let config = GameConfig::new(["Ana", "Ben", "Cy"]).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seat names in turn order.
    pub player_names: Vec<String>,

    #[serde(default)]
    pub composition: DeckComposition,

    /// Shuffle seed. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new<I, S>(player_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            composition: DeckComposition::standard(),
            seed: None,
        }
    }

    /// Seats named "Player 1" .. "Player n".
    #[must_use]
    pub fn numbered(player_count: usize) -> Self {
        Self::new((1..=player_count).map(|n| format!("Player {n}")))
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_composition(mut self, composition: DeckComposition) -> Self {
        self.composition = composition;
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Check seat count, names and deck size.
    pub fn validate(&self) -> Result<(), GameError> {
        let count = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::config(format!(
                "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {count}"
            )));
        }

        if let Some(pos) = self.player_names.iter().position(|n| n.trim().is_empty()) {
            return Err(GameError::config(format!("player {} has a blank name", pos + 1)));
        }

        if self.composition.total() == 0 {
            return Err(GameError::config("deck composition has no cards"));
        }

        if self.composition.total() > usize::from(u16::MAX) {
            return Err(GameError::config("deck composition is too large"));
        }

        Ok(())
    }
}

//! The shared deck: a draw pile and a discard pile.
//!
//! Both piles are ordered with the top at the end of the vec. When the draw
//! pile runs out, the whole discard pile becomes the new draw pile and is
//! reshuffled; drawing only fails when both piles are empty.
//!
//! ## Usage
//!
//! ```
//! use bomb_deck::cards::Deck;
//! use bomb_deck::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut deck = Deck::standard(&mut rng);
//! assert_eq!(deck.draw_pile_len(), 60);
//!
//! let card = deck.draw(&mut rng).unwrap();
//! deck.discard(card);
//! assert_eq!(deck.draw_pile_len(), 59);
//! assert_eq!(deck.discard_pile().len(), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, CardId, CardKind};
use crate::core::config::DeckComposition;
use crate::core::error::GameError;
use crate::core::rng::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// An empty deck. Call `initialize` before drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A shuffled 60-card standard deck.
    #[must_use]
    pub fn standard(rng: &mut GameRng) -> Self {
        Self::with_composition(&DeckComposition::standard(), rng)
    }

    /// A shuffled deck with the given composition.
    #[must_use]
    pub fn with_composition(composition: &DeckComposition, rng: &mut GameRng) -> Self {
        let mut deck = Self::new();
        deck.initialize(composition, rng);
        deck
    }

    /// Build from explicit piles, top of each pile last.
    ///
    /// No shuffling is done, so callers control the draw order exactly.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    /// Rebuild the draw pile from `composition`, clear the discard pile and
    /// shuffle.
    ///
    /// Every previous card is dropped and fresh ids are assigned, so this is
    /// meant to be called once per game.
    pub fn initialize(&mut self, composition: &DeckComposition, rng: &mut GameRng) {
        self.draw_pile.clear();
        self.discard_pile.clear();
        self.draw_pile.reserve(composition.total());

        let mut next_id = 0u16;
        for kind in CardKind::ALL {
            for _ in 0..composition.count(kind) {
                self.draw_pile
                    .push(Card::new(CardId::new(next_id), kind, composition.point_value));
                next_id = next_id.wrapping_add(1);
            }
        }

        self.shuffle(rng);
        debug!(cards = self.draw_pile.len(), "deck initialized");
    }

    /// Uniformly permute the draw pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_pile);
    }

    /// Take the top card, reshuffling the discard pile in first if the draw
    /// pile is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(GameError::EmptyDeck);
            }
            self.reshuffle(rng);
        }

        self.draw_pile.pop().ok_or(GameError::EmptyDeck)
    }

    fn reshuffle(&mut self, rng: &mut GameRng) {
        std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
        self.shuffle(rng);
        debug!(cards = self.draw_pile.len(), "discard pile reshuffled into draw pile");
    }

    /// Put a card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Discard several cards, in order.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    /// Move the first card of `kind` in the draw pile to the top.
    ///
    /// Lets tests and tutorials arrange the next draw without creating or
    /// destroying cards. Returns `false` if the draw pile holds no such card.
    pub fn move_to_top(&mut self, kind: CardKind) -> bool {
        match self.draw_pile.iter().position(|c| c.is(kind)) {
            Some(pos) => {
                let card = self.draw_pile.remove(pos);
                self.draw_pile.push(card);
                true
            }
            None => false,
        }
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards in both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of each kind across both piles.
    #[must_use]
    pub fn kind_counts(&self) -> FxHashMap<CardKind, usize> {
        let mut counts = FxHashMap::default();
        for card in self.draw_pile.iter().chain(&self.discard_pile) {
            *counts.entry(card.kind()).or_insert(0) += 1;
        }
        counts
    }
}

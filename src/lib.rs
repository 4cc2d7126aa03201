//! # bomb-deck
//!
//! A turn-based card elimination game for a small table of local players
//! sharing one deck.
//!
//! ## Rules
//!
//! On their turn a player draws one card:
//!
//! - **Bomb**: spend a Defuser to survive, otherwise the player is out and
//!   their whole hand goes to the discard pile
//! - **SkipTurn**: the player must explicitly end their turn
//! - **Defuser** / **PointCard**: kept in hand, turn passes on
//!
//! The last player standing wins.
//!
//! ## Design
//!
//! - **Explicit state machine**: `GameEngine` is in one of `AwaitingDraw`,
//!   `AwaitingSkipAck` or `GameOver`, and rejects calls made in the wrong
//!   state with a typed error.
//!
//! - **Injected randomness**: every game owns a seeded `GameRng`, so shuffles
//!   and reshuffles are reproducible.
//!
//! - **Conservation**: cards only ever move between the draw pile, the
//!   discard pile and player hands.
//!
//! ## Modules
//!
//! - `core`: Players, seat ids, RNG, configuration, errors
//! - `cards`: Cards and the deck
//! - `rules`: The turn state machine

pub mod cards;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    DeckComposition, GameConfig, GameError, GameRng, GameRngState, Player, PlayerId, PlayerMap,
    PlayerStats,
};

pub use crate::cards::{Card, CardId, CardKind, Deck};

pub use crate::rules::{
    initialize_game, DrawOutcome, DrawResult, GameEngine, GameResult, GameSnapshot, TurnAdvance,
    TurnRecord, TurnState,
};

//! Core building blocks: seats and players, RNG, configuration and errors.
//!
//! Nothing in here knows about turn order; that lives in `rules`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{DeckComposition, GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::GameError;
pub use player::{Hand, Player, PlayerId, PlayerMap, PlayerStats};
pub use rng::{GameRng, GameRngState};

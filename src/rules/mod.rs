//! Turn state machine and card-effect rules.
//!
//! `GameEngine` applies the effect of each drawn card, eliminates players,
//! and rotates the turn over the seats still in the game. Front ends read
//! its state to decide what to offer the player; they never drive it by
//! anything other than the two state-gated calls.

pub mod engine;

pub use engine::{
    initialize_game, DrawOutcome, DrawResult, GameEngine, GameResult, GameSnapshot, TurnAdvance,
    TurnRecord, TurnState,
};

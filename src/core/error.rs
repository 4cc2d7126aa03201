//! Typed failures surfaced to the presentation layer.
//!
//! None of these are fatal: each one reports a call the caller should not
//! have made in the current state, and leaves the game untouched.

use thiserror::Error;

use super::player::PlayerId;
use crate::rules::TurnState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Draw attempted with both the draw pile and the discard pile empty.
    #[error("no cards left to draw: draw and discard piles are both empty")]
    EmptyDeck,

    #[error("hand index {index} out of range for hand of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: TurnState,
    },

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("invalid game configuration: {message}")]
    InvalidConfig { message: String },
}

impl GameError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

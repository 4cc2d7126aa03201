//! Cards and the shared deck.
//!
//! ## Key Types
//!
//! - `CardKind`: Bomb, Defuser, SkipTurn or PointCard
//! - `Card`: an immutable card with a per-game `CardId`
//! - `Deck`: draw pile plus discard pile, reshuffling when the draw pile runs out

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardKind, DEFAULT_POINTS};
pub use deck::Deck;

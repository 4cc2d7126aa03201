//! Card values.
//!
//! A `Card` is created once when the deck is initialized and then only moves
//! between the draw pile, the discard pile and player hands. Its kind never
//! changes after creation, so the fields are private and read through
//! accessors.

use serde::{Deserialize, Serialize};

/// Default value carried by every card. Only point cards are scored.
pub const DEFAULT_POINTS: u32 = 10;

/// What a card does when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Eliminates the drawer unless they hold a Defuser.
    Bomb,
    /// Consumed to cancel one Bomb.
    Defuser,
    /// Drawer must explicitly end their turn.
    SkipTurn,
    /// No effect; counts towards the point total.
    PointCard,
}

impl CardKind {
    /// All kinds, in deck composition order.
    pub const ALL: [CardKind; 4] = [
        CardKind::Bomb,
        CardKind::Defuser,
        CardKind::SkipTurn,
        CardKind::PointCard,
    ];

    /// Short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Bomb => "bomb",
            CardKind::Defuser => "defuser",
            CardKind::SkipTurn => "skip turn",
            CardKind::PointCard => "point card",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a physical card within one game.
///
/// Ids are assigned sequentially by `Deck::initialize`; two cards in the
/// same game never share an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A single card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    kind: CardKind,
    points: u32,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind, points: u32) -> Self {
        Self { id, kind, points }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        self.kind
    }

    /// Nominal value of the card.
    ///
    /// Non-point cards carry one too, but it is never consulted for scoring;
    /// use `scoring_points` for that.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Points this card contributes to a hand total.
    #[must_use]
    pub const fn scoring_points(&self) -> u32 {
        match self.kind {
            CardKind::PointCard => self.points,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is(&self, kind: CardKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::PointCard => write!(f, "{} ({} pts)", self.kind, self.points),
            kind => write!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_point_cards_score() {
        let point = Card::new(CardId::new(0), CardKind::PointCard, DEFAULT_POINTS);
        let bomb = Card::new(CardId::new(1), CardKind::Bomb, DEFAULT_POINTS);

        assert_eq!(point.scoring_points(), 10);
        assert_eq!(bomb.points(), 10);
        assert_eq!(bomb.scoring_points(), 0);
    }

    #[test]
    fn test_display() {
        let point = Card::new(CardId::new(3), CardKind::PointCard, 10);
        let skip = Card::new(CardId::new(4), CardKind::SkipTurn, 10);

        assert_eq!(point.to_string(), "point card (10 pts)");
        assert_eq!(skip.to_string(), "skip turn");
        assert_eq!(CardId::new(4).to_string(), "Card(4)");
    }

    #[test]
    fn test_card_serde() {
        let card = Card::new(CardId::new(9), CardKind::Defuser, 10);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}

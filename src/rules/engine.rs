//! The turn state machine.
//!
//! One `GameEngine` owns the players, the shared deck and the RNG for a
//! single game. The front end drives it with two mutating calls:
//!
//! - `draw_for_current_player`: valid in `AwaitingDraw`
//! - `acknowledge_skip`: valid in `AwaitingSkipAck`
//!
//! Everything else is a read. Calls made in the wrong state fail with
//! `GameError::InvalidState` and change nothing.
//!
//! ## Turn order
//!
//! Seats rotate in their fixed starting order. Eliminated seats are skipped,
//! never removed, so with seats [A, B, C] and B out, turns go A, C, A, C...

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{Card, CardKind, Deck};
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::player::{Player, PlayerId, PlayerMap, PlayerStats};
use crate::core::rng::{GameRng, GameRngState};

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Current player may draw.
    AwaitingDraw,
    /// Current player drew a skip card and must end their turn.
    AwaitingSkipAck,
    /// At most one active player remains.
    GameOver,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TurnState::AwaitingDraw => "awaiting draw",
            TurnState::AwaitingSkipAck => "awaiting skip acknowledgement",
            TurnState::GameOver => "game over",
        })
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Sole surviving player.
    Winner(PlayerId),
    /// Everyone was eliminated.
    NoWinner,
}

impl GameResult {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::NoWinner => None,
        }
    }
}

/// What a draw did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// No special effect.
    CardDrawn,
    /// A defuser was spent; the bomb stays in hand.
    BombDefused,
    /// Drawer had no defuser and is out.
    PlayerEliminated(PlayerId),
    /// Drawer must call `acknowledge_skip` to end their turn.
    MustAcknowledgeSkip,
}

/// Where the turn went after it ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAdvance {
    NextPlayer(PlayerId),
    Finished(GameResult),
}

/// Returned from `draw_for_current_player`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub card: Card,
    pub outcome: DrawOutcome,
    /// `Some` whenever the draw ended the turn, i.e. for everything except
    /// a skip card.
    pub advance: Option<TurnAdvance>,
}

/// One draw, as kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number when the draw happened.
    pub turn: u32,
    pub player: PlayerId,
    pub card: Card,
    pub outcome: DrawOutcome,
}

/// Serializable view of a game for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: TurnState,
    pub current_player: PlayerId,
    pub turn: u32,
    pub players: Vec<PlayerStats>,
    pub draw_pile_len: usize,
    pub discard_pile: Vec<Card>,
    pub result: Option<GameResult>,
    pub rng: GameRngState,
}

/// A single game in progress.
#[derive(Clone, Debug)]
pub struct GameEngine {
    players: PlayerMap<Player>,
    deck: Deck,
    rng: GameRng,
    current: PlayerId,
    state: TurnState,
    result: Option<GameResult>,
    turn: u32,
    history: Vec<TurnRecord>,
}

/// Start a game for the named seats with a freshly shuffled standard deck.
///
/// ```
/// use bomb_deck::rules::{initialize_game, TurnState};
///
/// let game = initialize_game(["Ana", "Ben", "Cy"]).unwrap();
/// assert_eq!(game.current_player().name(), "Ana");
/// assert_eq!(game.state(), TurnState::AwaitingDraw);
/// assert_eq!(game.total_cards(), 60);
/// ```
pub fn initialize_game<I, S>(player_names: I) -> Result<GameEngine, GameError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    GameEngine::new(GameConfig::new(player_names))
}

impl GameEngine {
    /// Validate `config`, build and shuffle its deck, and seat the players.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let deck = Deck::with_composition(&config.composition, &mut rng);
        let players = config.player_names.into_iter().map(Player::new).collect();

        Self::with_parts(players, deck, rng)
    }

    /// Assemble a game from already-built parts.
    ///
    /// The first active seat starts. With fewer than two active players the
    /// game starts already over.
    pub fn with_parts(players: Vec<Player>, deck: Deck, rng: GameRng) -> Result<Self, GameError> {
        let players = PlayerMap::from_vec(players)?;
        let first = players
            .iter()
            .find(|(_, p)| p.is_active())
            .map_or(PlayerId::new(0), |(id, _)| id);

        let mut engine = Self {
            players,
            deck,
            rng,
            current: first,
            state: TurnState::AwaitingDraw,
            result: None,
            turn: 0,
            history: Vec::new(),
        };

        if engine.active_players().len() <= 1 {
            engine.finish();
        }

        info!(
            players = engine.players.player_count(),
            cards = engine.deck.len(),
            seed = engine.rng.seed(),
            "game started"
        );
        Ok(engine)
    }

    // === Mutating operations ===

    /// Current player draws one card and its effect is resolved.
    pub fn draw_for_current_player(&mut self) -> Result<DrawResult, GameError> {
        self.expect_state(TurnState::AwaitingDraw, "draw")?;

        let card = self.deck.draw(&mut self.rng)?;
        let drawer = self.current;
        debug!(player = %drawer, card = %card, "card drawn");
        self.players[drawer].add_card(card.clone());

        let outcome = match card.kind() {
            CardKind::Bomb => self.resolve_bomb(drawer)?,
            CardKind::SkipTurn => {
                self.state = TurnState::AwaitingSkipAck;
                DrawOutcome::MustAcknowledgeSkip
            }
            CardKind::Defuser | CardKind::PointCard => DrawOutcome::CardDrawn,
        };

        self.history.push(TurnRecord {
            turn: self.turn,
            player: drawer,
            card: card.clone(),
            outcome,
        });

        let advance = match outcome {
            DrawOutcome::MustAcknowledgeSkip => None,
            _ => Some(self.advance_turn()),
        };

        Ok(DrawResult {
            card,
            outcome,
            advance,
        })
    }

    /// End a turn held open by a skip card.
    pub fn acknowledge_skip(&mut self) -> Result<TurnAdvance, GameError> {
        self.expect_state(TurnState::AwaitingSkipAck, "acknowledge skip")?;
        self.state = TurnState::AwaitingDraw;
        Ok(self.advance_turn())
    }

    fn resolve_bomb(&mut self, drawer: PlayerId) -> Result<DrawOutcome, GameError> {
        let player = &mut self.players[drawer];

        if let Some(index) = player.position_of(CardKind::Defuser) {
            let defuser = player.remove_card_at(index)?;
            self.deck.discard(defuser);
            info!(player = %drawer, "bomb defused");
            return Ok(DrawOutcome::BombDefused);
        }

        let hand = player.clear_hand();
        player.eliminate();
        info!(player = %drawer, discarded = hand.len(), "player eliminated");
        self.deck.discard_all(hand);
        Ok(DrawOutcome::PlayerEliminated(drawer))
    }

    /// Pass the turn to the next active seat, or end the game.
    fn advance_turn(&mut self) -> TurnAdvance {
        if self.active_players().len() <= 1 {
            return TurnAdvance::Finished(self.finish());
        }

        let count = self.players.player_count();
        let mut next = (self.current.index() + 1) % count;
        while self.players[PlayerId::new(next as u8)].is_eliminated() {
            next = (next + 1) % count;
        }

        self.current = PlayerId::new(next as u8);
        self.state = TurnState::AwaitingDraw;
        self.turn += 1;
        debug!(player = %self.current, turn = self.turn, "turn advanced");
        TurnAdvance::NextPlayer(self.current)
    }

    fn finish(&mut self) -> GameResult {
        let result = match self.active_players().as_slice() {
            [winner] => GameResult::Winner(*winner),
            _ => GameResult::NoWinner,
        };
        self.state = TurnState::GameOver;
        self.result = Some(result);

        match result {
            GameResult::Winner(p) => info!(winner = %p, name = self.players[p].name(), "game won"),
            GameResult::NoWinner => info!("game over with no winner"),
        }
        result
    }

    fn expect_state(&self, expected: TurnState, operation: &'static str) -> Result<(), GameError> {
        if self.state == expected {
            return Ok(());
        }
        warn!(operation, state = %self.state, "rejected call in wrong state");
        Err(GameError::InvalidState {
            operation,
            state: self.state,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    /// `Some` once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::UnknownPlayer(id))
    }

    pub fn stats(&self, id: PlayerId) -> Result<PlayerStats, GameError> {
        self.player(id).map(|p| p.stats(id))
    }

    /// Stats for every seat, in seat order.
    #[must_use]
    pub fn all_stats(&self) -> Vec<PlayerStats> {
        self.players.iter().map(|(id, p)| p.stats(id)).collect()
    }

    /// Seats still in the game, in seat order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mutable deck access for arranging upcoming draws.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        self.deck.discard_pile()
    }

    /// Number of completed turn hand-offs.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Every draw so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Cards in the deck plus every hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.players.values().map(Player::card_count).sum::<usize>()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            current_player: self.current,
            turn: self.turn,
            players: self.all_stats(),
            draw_pile_len: self.deck.draw_pile_len(),
            discard_pile: self.deck.discard_pile().to_vec(),
            result: self.result,
            rng: self.rng.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(GameConfig::numbered(3).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let game = engine(42);

        assert_eq!(game.state(), TurnState::AwaitingDraw);
        assert_eq!(game.current_player_id(), PlayerId::new(0));
        assert_eq!(game.current_player().name(), "Player 1");
        assert_eq!(game.active_players().len(), 3);
        assert_eq!(game.result(), None);
        assert_eq!(game.total_cards(), 60);
    }

    #[test]
    fn test_point_card_advances_turn() {
        let mut game = engine(1);
        assert!(game.deck_mut().move_to_top(CardKind::PointCard));

        let result = game.draw_for_current_player().unwrap();

        assert_eq!(result.outcome, DrawOutcome::CardDrawn);
        assert_eq!(result.advance, Some(TurnAdvance::NextPlayer(PlayerId::new(1))));
        assert_eq!(game.state(), TurnState::AwaitingDraw);
        assert_eq!(game.player(PlayerId::new(0)).unwrap().point_total(), 10);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_defuser_has_no_immediate_effect() {
        let mut game = engine(2);
        game.deck_mut().move_to_top(CardKind::Defuser);

        let result = game.draw_for_current_player().unwrap();

        assert_eq!(result.outcome, DrawOutcome::CardDrawn);
        assert_eq!(game.stats(PlayerId::new(0)).unwrap().defuser_count, 1);
        assert_eq!(game.current_player_id(), PlayerId::new(1));
    }

    #[test]
    fn test_skip_holds_turn_open() {
        let mut game = engine(3);
        game.deck_mut().move_to_top(CardKind::SkipTurn);

        let result = game.draw_for_current_player().unwrap();
        assert_eq!(result.outcome, DrawOutcome::MustAcknowledgeSkip);
        assert_eq!(result.advance, None);
        assert_eq!(game.state(), TurnState::AwaitingSkipAck);
        assert_eq!(game.current_player_id(), PlayerId::new(0));

        let err = game.draw_for_current_player().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidState {
                operation: "draw",
                state: TurnState::AwaitingSkipAck
            }
        );

        let advance = game.acknowledge_skip().unwrap();
        assert_eq!(advance, TurnAdvance::NextPlayer(PlayerId::new(1)));
        assert_eq!(game.state(), TurnState::AwaitingDraw);
    }

    #[test]
    fn test_acknowledge_without_skip_fails() {
        let mut game = engine(4);
        assert!(matches!(
            game.acknowledge_skip(),
            Err(GameError::InvalidState { state: TurnState::AwaitingDraw, .. })
        ));
        assert_eq!(game.current_player_id(), PlayerId::new(0));
    }

    #[test]
    fn test_bomb_with_defuser_keeps_bomb_in_hand() {
        let mut game = engine(5);

        // Seat 0 picks up a defuser, then the others draw point cards.
        game.deck_mut().move_to_top(CardKind::Defuser);
        game.draw_for_current_player().unwrap();
        for _ in 0..2 {
            game.deck_mut().move_to_top(CardKind::PointCard);
            game.draw_for_current_player().unwrap();
        }

        game.deck_mut().move_to_top(CardKind::Bomb);
        let result = game.draw_for_current_player().unwrap();

        assert_eq!(result.outcome, DrawOutcome::BombDefused);
        assert_eq!(result.advance, Some(TurnAdvance::NextPlayer(PlayerId::new(1))));

        let seat0 = game.player(PlayerId::new(0)).unwrap();
        assert_eq!(seat0.card_count(), 1);
        assert_eq!(seat0.hand()[0].kind(), CardKind::Bomb);
        assert!(!seat0.is_eliminated());

        assert_eq!(game.discard_pile().len(), 1);
        assert_eq!(game.discard_pile()[0].kind(), CardKind::Defuser);
        assert_eq!(game.total_cards(), 60);
    }

    #[test]
    fn test_bomb_without_defuser_eliminates() {
        let mut game = engine(6);
        game.deck_mut().move_to_top(CardKind::Bomb);

        let result = game.draw_for_current_player().unwrap();

        assert_eq!(result.outcome, DrawOutcome::PlayerEliminated(PlayerId::new(0)));
        assert_eq!(result.advance, Some(TurnAdvance::NextPlayer(PlayerId::new(1))));
        assert!(game.player(PlayerId::new(0)).unwrap().is_eliminated());
        assert_eq!(game.player(PlayerId::new(0)).unwrap().card_count(), 0);
        assert_eq!(game.discard_pile().len(), 1);
        assert_eq!(game.active_players(), vec![PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_last_survivor_wins() {
        let mut game = GameEngine::new(GameConfig::numbered(2).with_seed(7)).unwrap();
        game.deck_mut().move_to_top(CardKind::Bomb);

        let result = game.draw_for_current_player().unwrap();

        let expected = GameResult::Winner(PlayerId::new(1));
        assert_eq!(result.advance, Some(TurnAdvance::Finished(expected)));
        assert_eq!(game.result(), Some(expected));
        assert!(game.is_over());
        assert!(matches!(
            game.draw_for_current_player(),
            Err(GameError::InvalidState { state: TurnState::GameOver, .. })
        ));
        assert!(game.acknowledge_skip().is_err());
    }

    #[test]
    fn test_with_parts_single_active_player_is_over() {
        let mut out = Player::new("Out");
        out.eliminate();
        let game = GameEngine::with_parts(
            vec![out, Player::new("In")],
            Deck::new(),
            GameRng::new(0),
        )
        .unwrap();

        assert!(game.is_over());
        assert_eq!(game.result(), Some(GameResult::Winner(PlayerId::new(1))));
        assert_eq!(game.result().and_then(|r| r.winner()), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_with_parts_no_active_players_has_no_winner() {
        let mut a = Player::new("A");
        let mut b = Player::new("B");
        a.eliminate();
        b.eliminate();

        let mut game =
            GameEngine::with_parts(vec![a, b], Deck::new(), GameRng::new(0)).unwrap();

        assert_eq!(game.state(), TurnState::GameOver);
        assert_eq!(game.result(), Some(GameResult::NoWinner));
        assert_eq!(game.result().and_then(|r| r.winner()), None);
        assert!(game.active_players().is_empty());
        assert!(matches!(
            game.draw_for_current_player(),
            Err(GameError::InvalidState { state: TurnState::GameOver, .. })
        ));
    }

    #[test]
    fn test_empty_deck_error_leaves_state() {
        let mut game = GameEngine::with_parts(
            vec![Player::new("A"), Player::new("B")],
            Deck::new(),
            GameRng::new(0),
        )
        .unwrap();

        assert_eq!(game.draw_for_current_player(), Err(GameError::EmptyDeck));
        assert_eq!(game.state(), TurnState::AwaitingDraw);
        assert_eq!(game.current_player_id(), PlayerId::new(0));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_history_records_draws() {
        let mut game = engine(8);
        game.deck_mut().move_to_top(CardKind::PointCard);
        game.draw_for_current_player().unwrap();
        game.deck_mut().move_to_top(CardKind::SkipTurn);
        game.draw_for_current_player().unwrap();

        let history = game.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].player, PlayerId::new(0));
        assert_eq!(history[0].turn, 0);
        assert_eq!(history[1].player, PlayerId::new(1));
        assert_eq!(history[1].outcome, DrawOutcome::MustAcknowledgeSkip);
    }

    #[test]
    fn test_unknown_player() {
        let game = engine(9);
        assert_eq!(
            game.stats(PlayerId::new(7)),
            Err(GameError::UnknownPlayer(PlayerId::new(7)))
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = engine(10);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.players.len(), 3);
        assert_eq!(snapshot.draw_pile_len, 60);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}

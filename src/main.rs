//! Terminal front end: plays a game of bomb-deck automatically.
//!
//! Every seat draws on its turn, skip cards are acknowledged right after
//! being shown, and the table is re-rendered after each action. The optional
//! `--pause-ms` delay sits between a draw and the next turn for readability;
//! the engine itself always advances immediately.

use std::thread;
use std::time::Duration;

use bomb_deck::{
    Card, CardKind, DrawOutcome, GameConfig, GameEngine, GameError, GameResult, GameRng,
    TurnAdvance, TurnState,
};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bomb-deck")]
#[command(about = "Play a bomb elimination card game in the terminal")]
struct Args {
    /// Player names, in turn order
    #[arg(short, long, num_args = 2.., default_values = ["Player 1", "Player 2", "Player 3"])]
    players: Vec<String>,

    /// Shuffle seed (for reproducible games)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause after each draw before the turn passes, in milliseconds
    #[arg(long, default_value = "0")]
    pause_ms: u64,

    /// Stop after this many draws even if nobody has won
    #[arg(long, default_value = "10000")]
    max_draws: u32,

    /// Print the final game snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Number of point-card artwork variants.
const POINT_ART_VARIANTS: usize = 20;

/// Artwork for a card. Point cards get a random cosmetic variant.
fn art_for(card: &Card, rng: &mut GameRng) -> String {
    match card.kind() {
        CardKind::Bomb => "./img/bomb/bomb.png".to_string(),
        CardKind::Defuser => "./img/tool/tool.png".to_string(),
        CardKind::SkipTurn => "./img/skip/skip.png".to_string(),
        CardKind::PointCard => {
            let variant = rng.gen_range_usize(1..POINT_ART_VARIANTS + 1);
            format!("./img/card/robot_{variant:02}.png")
        }
    }
}

fn render_table(game: &GameEngine) {
    for stats in game.all_stats() {
        let marker = if stats.eliminated {
            "x"
        } else if stats.id == game.current_player_id() && !game.is_over() {
            ">"
        } else {
            " "
        };
        println!(
            " {marker} {:<12} cards: {:>2}  points: {:>4}  skip cards: {:>2}  defusers: {:>2}",
            stats.name, stats.card_count, stats.point_total, stats.skip_turn_count, stats.defuser_count
        );
    }
}

fn render_discards(game: &GameEngine) {
    println!("Discard pile:");
    for (i, card) in game.discard_pile().iter().enumerate() {
        println!("  Card {}: {}", i + 1, card.kind());
    }
}

fn announce(game: &GameEngine, result: GameResult) {
    match result.winner() {
        Some(id) => {
            let name = game.player(id).map(|p| p.name()).unwrap_or("?");
            println!("{name} wins the game!");
        }
        None => println!("Nobody survived."),
    }
}

/// Art variants follow the game seed when one is given.
fn art_rng(seed: Option<u64>) -> GameRng {
    let base = match seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    base.for_context("art")
}

fn play(game: &mut GameEngine, args: &Args, art_rng: &mut GameRng) -> Result<(), GameError> {
    let pause = Duration::from_millis(args.pause_ms);
    let mut draws = 0;

    render_table(game);
    while !game.is_over() {
        if draws >= args.max_draws {
            warn!(draws, "draw limit reached before the game ended");
            break;
        }

        let drawer = game.current_player().name().to_string();
        let result = match game.draw_for_current_player() {
            Ok(result) => result,
            Err(GameError::EmptyDeck) => {
                // Every bomb was defused and the remaining cards sit in hands.
                println!("No cards left in the deck.");
                break;
            }
            Err(e) => return Err(e),
        };
        draws += 1;

        println!();
        println!("{drawer} draws {} [{}]", result.card, art_for(&result.card, art_rng));

        match result.outcome {
            DrawOutcome::CardDrawn => {}
            DrawOutcome::BombDefused => println!("Bomb defused!"),
            DrawOutcome::PlayerEliminated(_) => {
                println!("{drawer} is eliminated and their cards are discarded.");
                render_discards(game);
            }
            DrawOutcome::MustAcknowledgeSkip => println!("{drawer} must pass the turn."),
        }
        render_table(game);

        if !pause.is_zero() {
            thread::sleep(pause);
        }

        let advance = match result.advance {
            Some(advance) => advance,
            None => {
                debug_assert_eq!(game.state(), TurnState::AwaitingSkipAck);
                game.acknowledge_skip()?
            }
        };

        if let TurnAdvance::Finished(outcome) = advance {
            println!();
            announce(game, outcome);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = GameConfig::new(args.players.iter().cloned());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut game = GameEngine::new(config)?;
    let mut art_rng = art_rng(args.seed);
    info!(players = game.player_count(), "starting game");

    play(&mut game, &args, &mut art_rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }

    Ok(())
}

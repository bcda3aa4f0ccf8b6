//! Play command - random-vs-random matches
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_all(), report_results()
//! - Level 3: play_single_game(), compute_statistics()

use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use warpdraughts_core::{Match, MatchResult, Outcome, Player, RandomOpponent, DEFAULT_DEPTH};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Board depth (double rows of pieces per side)
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// RNG seed; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum turns per game
    #[arg(long, default_value = "400")]
    pub max_turns: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    stalled: bool,
    turns: u32,
    white_score: u64,
    black_score: u64,
}

/// Aggregated results
#[derive(Clone, Debug, Serialize)]
struct PlayResults {
    games: Vec<GameRecord>,
    white_wins: usize,
    black_wins: usize,
    unfinished: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the play command: play every game, then report
pub fn run(args: PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting {} game(s): depth={}, seed={}",
        args.games,
        args.depth,
        seed
    );

    let results = play_all(&args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all requested games, each with a derived seed
fn play_all(args: &PlayArgs, seed: u64) -> PlayResults {
    let mut games = Vec::with_capacity(args.games);

    for game_number in 1..=args.games {
        let game_seed = seed.wrapping_add(game_number as u64);
        let record = play_single_game(args, game_seed, game_number);

        tracing::info!(
            "Game {}: winner={:?} after {} turns (white {} / black {})",
            record.game_number,
            record.winner,
            record.turns,
            record.white_score,
            record.black_score
        );

        games.push(record);
    }

    compute_statistics(games)
}

/// Report results as text or JSON
fn report_results(results: &PlayResults, args: &PlayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        println!("Games:      {}", results.games.len());
        println!("White wins: {}", results.white_wins);
        println!("Black wins: {}", results.black_wins);
        println!("Unfinished: {}", results.unfinished);
        println!("Avg turns:  {:.1}", results.avg_turns);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single random-vs-random game
fn play_single_game(args: &PlayArgs, seed: u64, game_number: usize) -> GameRecord {
    let mut game = Match::new(args.depth);
    let mut opponent = RandomOpponent::new(seed);
    let mut turns = 0;
    let mut stalled = false;
    let mut last_move = Instant::now();

    while turns < args.max_turns {
        let player = game.current_player();
        let waited = last_move.elapsed().as_secs_f64();

        match opponent.play_turn(&mut game, player) {
            Outcome::Moved { .. } => {
                game.add_time_bonus(player, waited);
                last_move = Instant::now();
                turns += 1;
            }
            Outcome::NoLegalMoves => {
                // the engine leaves stalemate to the driver; we end the game
                tracing::debug!("{:?} has no legal moves, ending game", player);
                stalled = true;
                break;
            }
            Outcome::Finished => break,
        }
    }

    let winner = match game.result() {
        MatchResult::Won(player) => Some(player),
        MatchResult::Ongoing => None,
    };

    GameRecord {
        game_number,
        winner,
        stalled,
        turns,
        white_score: game.score(Player::White),
        black_score: game.score(Player::Black),
    }
}

/// Aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> PlayResults {
    let white_wins = games
        .iter()
        .filter(|g| g.winner == Some(Player::White))
        .count();
    let black_wins = games
        .iter()
        .filter(|g| g.winner == Some(Player::Black))
        .count();
    let unfinished = games.iter().filter(|g| g.winner.is_none()).count();

    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    PlayResults {
        games,
        white_wins,
        black_wins,
        unfinished,
        avg_turns,
    }
}

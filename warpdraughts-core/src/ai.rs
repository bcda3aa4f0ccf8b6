//! Random opponent driver
//!
//! Picks a uniformly random legal (piece, destination) pair for one side
//! and applies it through the same path as a completed click.

use crate::board::CubeCoord;
use crate::game::{Match, MatchResult};
use crate::pieces::Player;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Outcome of one driver turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved { from: CubeCoord, to: CubeCoord },
    /// The side to move has no legal move. The engine does not rule this a
    /// loss or a draw; the match is left untouched and the caller decides.
    NoLegalMoves,
    Finished,
}

/// Uniform-random legal-move picker for the non-human side
pub struct RandomOpponent {
    rng: ChaCha8Rng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Every legal (piece, destination) pair for `player`
    pub fn legal_pairs(game: &Match, player: Player) -> Vec<(CubeCoord, CubeCoord)> {
        let mut pairs = Vec::new();
        for (coord, piece) in game.pieces() {
            if piece.owner != player {
                continue;
            }
            for dest in game.destinations_for(coord) {
                pairs.push((coord, dest));
            }
        }
        pairs
    }

    /// Play one turn for `player`, chosen uniformly over all legal pairs
    pub fn play_turn(&mut self, game: &mut Match, player: Player) -> Outcome {
        if game.result() != MatchResult::Ongoing {
            return Outcome::Finished;
        }
        debug_assert_eq!(game.current_player(), player, "not this side's turn");

        let pairs = Self::legal_pairs(game, player);
        let (from, to) = match pairs.choose(&mut self.rng) {
            Some(&pair) => pair,
            None => return Outcome::NoLegalMoves,
        };

        game.play(from, to);
        Outcome::Moved { from, to }
    }
}

/// Play both sides at random until the match ends, a side runs out of
/// moves, or `max_turns` is reached. Returns the number of turns played.
pub fn play_random_game(game: &mut Match, seed: u64, max_turns: u32) -> u32 {
    let mut opponent = RandomOpponent::new(seed);
    let mut turns = 0;
    while turns < max_turns {
        let player = game.current_player();
        match opponent.play_turn(game, player) {
            Outcome::Moved { .. } => turns += 1,
            Outcome::NoLegalMoves | Outcome::Finished => break,
        }
    }
    turns
}

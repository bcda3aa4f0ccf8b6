//! Match state machine: selection, turn sequencing, capture application,
//! promotion, scoring, and win detection

use crate::board::CubeCoord;
use crate::moves::{all_threats, destinations, takes_between};
use crate::pieces::{Piece, PieceMap, Player};
use crate::score::{pieces_bonus, takes_score, time_bonus};
use crate::setup::starting_position;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Match result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Ongoing,
    Won(Player),
}

/// Match state. The piece map is owned here exclusively; the move generator
/// and capture resolver only ever see it read-only.
#[derive(Clone, Debug)]
pub struct Match {
    pieces: PieceMap,
    current: Player,
    selected: Option<CubeCoord>,
    cached_moves: FxHashSet<CubeCoord>,
    cached_threats: FxHashSet<CubeCoord>,
    white_score: u64,
    black_score: u64,
    result: MatchResult,
}

impl Match {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New match from the standard starting position for `depth`
    pub fn new(depth: u32) -> Self {
        let mut pieces = FxHashMap::default();
        for (coord, owner) in starting_position(depth) {
            let prev = pieces.insert(coord, Piece::new(owner));
            debug_assert!(prev.is_none(), "starting cells must be unique");
        }
        Self::from_pieces(pieces)
    }

    /// Match from an explicit position, white to move
    pub fn from_pieces(pieces: PieceMap) -> Self {
        Self {
            pieces,
            current: Player::White,
            selected: None,
            cached_moves: FxHashSet::default(),
            cached_threats: FxHashSet::default(),
            white_score: 0,
            black_score: 0,
            result: MatchResult::Ongoing,
        }
    }

    // ========================================================================
    // ACCESSORS (renderer/driver read view)
    // ========================================================================

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result != MatchResult::Ongoing
    }

    pub fn score(&self, player: Player) -> u64 {
        match player {
            Player::White => self.white_score,
            Player::Black => self.black_score,
        }
    }

    pub fn piece_at(&self, coord: CubeCoord) -> Option<&Piece> {
        self.pieces.get(&coord)
    }

    /// Iterate live pieces
    pub fn pieces(&self) -> impl Iterator<Item = (CubeCoord, Piece)> + '_ {
        self.pieces.iter().map(|(&coord, &piece)| (coord, piece))
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces.values().filter(|p| p.owner == player).count()
    }

    /// Currently selected cell, if any
    pub fn selection(&self) -> Option<CubeCoord> {
        self.selected
    }

    /// Cached legal destinations for the current selection
    pub fn destinations(&self) -> &FxHashSet<CubeCoord> {
        &self.cached_moves
    }

    /// Cached threat squares for the current selection
    pub fn threats(&self) -> &FxHashSet<CubeCoord> {
        &self.cached_threats
    }

    /// Legal destinations for the piece at `coord`, plain or queen
    pub fn destinations_for(&self, coord: CubeCoord) -> FxHashSet<CubeCoord> {
        destinations(&self.pieces, coord)
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Handle one validated board coordinate from the input translator.
    /// Unrecognized targets are forgiven silently; nothing changes.
    pub fn click(&mut self, coord: CubeCoord) {
        if self.is_finished() || !coord.is_valid() {
            return;
        }

        let own_piece = self
            .pieces
            .get(&coord)
            .map_or(false, |p| p.owner == self.current);
        if own_piece {
            self.select(coord);
            return;
        }

        if let Some(from) = self.selected {
            if !self.pieces.contains_key(&coord) && self.cached_moves.contains(&coord) {
                self.play_move(from, coord);
            }
        }
    }

    /// Apply a legal move directly, bypassing the selection protocol (the
    /// random opponent drives the match through this path). An illegal pair
    /// is a caller contract violation.
    pub fn play(&mut self, from: CubeCoord, to: CubeCoord) {
        if self.is_finished() {
            return;
        }
        debug_assert!(
            destinations(&self.pieces, from).contains(&to),
            "illegal move {:?} -> {:?}",
            from,
            to
        );
        self.play_move(from, to);
    }

    /// Credit the per-turn time bonus for `seconds` elapsed before the move.
    /// The clock lives with the driver; the engine only consumes the value.
    pub fn add_time_bonus(&mut self, player: Player, seconds: f64) {
        if self.is_finished() {
            return;
        }
        self.add_score(player, time_bonus(seconds));
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn select(&mut self, coord: CubeCoord) {
        self.selected = Some(coord);
        self.cached_moves = destinations(&self.pieces, coord);
        self.cached_threats = all_threats(&self.pieces, coord, self.current);
    }

    fn play_move(&mut self, from: CubeCoord, to: CubeCoord) {
        let mover = self.current;

        let taken = takes_between(&self.pieces, from, to, mover);
        for &victim in &taken {
            self.apply_capture(victim);
        }
        if !taken.is_empty() {
            self.add_score(mover, takes_score(taken.len() as u32));
        }

        let piece = self.pieces.remove(&from).expect("no piece at move origin");
        let prev = self.pieces.insert(to, piece);
        assert!(prev.is_none(), "move destination occupied");

        self.selected = None;
        self.cached_moves.clear();
        self.cached_threats.clear();

        self.promote_back_rank();
        self.check_winner();
        if self.result == MatchResult::Ongoing {
            self.current = self.current.opponent();
        }
    }

    fn apply_capture(&mut self, coord: CubeCoord) {
        self.pieces
            .remove(&coord)
            .expect("no piece at capture coordinate");
    }

    fn promote_back_rank(&mut self) {
        for (coord, piece) in self.pieces.iter_mut() {
            if !piece.promoted && coord.x == piece.owner.promotion_rank() {
                piece.promote();
            }
        }
    }

    fn check_winner(&mut self) {
        let winner = if self.piece_count(Player::White) == 0 {
            Player::Black
        } else if self.piece_count(Player::Black) == 0 {
            Player::White
        } else {
            return;
        };

        let left = self.piece_count(winner) as u32;
        let queens = self
            .pieces
            .values()
            .filter(|p| p.owner == winner && p.promoted)
            .count() as u32;
        self.add_score(winner, pieces_bonus(left, queens));
        self.result = MatchResult::Won(winner);
    }

    fn add_score(&mut self, player: Player, points: u64) {
        match player {
            Player::White => self.white_score += points,
            Player::Black => self.black_score += points,
        }
    }
}

//! Players and pieces

use crate::board::{CubeCoord, Direction, BLACK_BACK_RANK, DIRECTIONS, WHITE_BACK_RANK};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Live pieces keyed by cell; the unique-coordinate invariant is structural
pub type PieceMap = FxHashMap<CubeCoord, Piece>;

const WHITE_FORWARD: [Direction; 2] = [DIRECTIONS[0], DIRECTIONS[1]];
const BLACK_FORWARD: [Direction; 2] = [DIRECTIONS[3], DIRECTIONS[4]];

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// The two forward-diagonal directions for plain pieces. White advances
    /// toward increasing x, black toward decreasing x.
    pub fn forward_directions(self) -> &'static [Direction; 2] {
        match self {
            Player::White => &WHITE_FORWARD,
            Player::Black => &BLACK_FORWARD,
        }
    }

    /// Rank where this player's plain pieces promote
    pub fn promotion_rank(self) -> i32 {
        match self {
            Player::White => WHITE_BACK_RANK,
            Player::Black => BLACK_BACK_RANK,
        }
    }
}

/// A piece on the board. Its cell is the key it is stored under; the owner
/// never changes and promotion is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub promoted: bool,
}

impl Piece {
    pub fn new(owner: Player) -> Self {
        Self {
            owner,
            promoted: false,
        }
    }

    pub fn promote(&mut self) {
        self.promoted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_total() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().opponent(), Player::White);
    }

    #[test]
    fn test_forward_directions() {
        for dir in Player::White.forward_directions() {
            assert_eq!(dir.dx, 1);
        }
        for dir in Player::Black.forward_directions() {
            assert_eq!(dir.dx, -1);
        }
    }

    #[test]
    fn test_promotion_is_one_way() {
        let mut piece = Piece::new(Player::White);
        assert!(!piece.promoted);
        piece.promote();
        assert!(piece.promoted);
        piece.promote();
        assert!(piece.promoted);
    }
}

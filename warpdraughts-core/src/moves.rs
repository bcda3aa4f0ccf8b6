//! Move generation and capture resolution
//!
//! Pure queries over a read-only piece map. Only the match state machine
//! mutates; everything here walks the same warp-aware rays, so threat
//! highlighting can never diverge from capture resolution.

use crate::board::{warp, CubeCoord, Direction, DIRECTIONS};
use crate::pieces::{PieceMap, Player};
use rustc_hash::FxHashSet;

// ============================================================================
// RAY WALKING
// ============================================================================

/// Advance one cell along `dir`, crossing the warp seam when the raw step
/// leaves the board. `None` when the step is off-board and the seam is
/// undefined there.
fn advance(from: CubeCoord, dir: Direction) -> Option<CubeCoord> {
    let step = from + dir;
    if step.is_valid() {
        return Some(step);
    }
    warp(step).filter(|w| w.is_valid())
}

/// Directions the piece at `coord` may move along
fn move_directions(pieces: &PieceMap, coord: CubeCoord, player: Player) -> &'static [Direction] {
    let promoted = pieces.get(&coord).map_or(false, |p| p.promoted);
    if promoted {
        &DIRECTIONS
    } else {
        player.forward_directions()
    }
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Destinations for an unpromoted piece: one forward step onto an empty
/// cell, or the jump over an adjacent opposing piece onto the empty cell
/// beyond. Steps leaving the board cross the seam before the check.
pub fn plain_moves(pieces: &PieceMap, from: CubeCoord, player: Player) -> FxHashSet<CubeCoord> {
    let mut dests = FxHashSet::default();
    for &dir in player.forward_directions() {
        let step = match advance(from, dir) {
            Some(step) => step,
            None => continue,
        };
        match pieces.get(&step) {
            None => {
                dests.insert(step);
            }
            Some(occupant) if occupant.owner != player => {
                if let Some(landing) = advance(step, dir) {
                    if !pieces.contains_key(&landing) {
                        dests.insert(landing);
                    }
                }
            }
            Some(_) => {}
        }
    }
    dests
}

/// Destinations for a promoted piece: slides of any distance along all six
/// directions, unrolled across the warp seam. Opposing pieces on the ray do
/// not stop the slide (they are captured in passing); friendly pieces do.
/// The seam makes constant-rank rays circular, so a walk stops when it
/// would re-enter its origin or a cell it already passed.
pub fn queen_moves(pieces: &PieceMap, from: CubeCoord, player: Player) -> FxHashSet<CubeCoord> {
    let mut dests = FxHashSet::default();
    for dir in DIRECTIONS {
        let mut seen = FxHashSet::default();
        let mut cur = from;
        loop {
            let next = match advance(cur, dir) {
                Some(next) => next,
                None => break,
            };
            if next == from || !seen.insert(next) {
                break;
            }
            match pieces.get(&next) {
                Some(piece) if piece.owner == player => break,
                Some(_) => cur = next,
                None => {
                    dests.insert(next);
                    cur = next;
                }
            }
        }
    }
    dests
}

/// Destinations for the piece at `coord`, plain or queen as appropriate;
/// empty when the cell is empty
pub fn destinations(pieces: &PieceMap, coord: CubeCoord) -> FxHashSet<CubeCoord> {
    match pieces.get(&coord) {
        Some(piece) if piece.promoted => queen_moves(pieces, coord, piece.owner),
        Some(piece) => plain_moves(pieces, coord, piece.owner),
        None => FxHashSet::default(),
    }
}

// ============================================================================
// CAPTURE RESOLUTION
// ============================================================================

/// Opposing pieces jumped over on the warp-aware straight line from `from`
/// to `to`, exclusive of both endpoints. `to` must be a destination the
/// generator produced for the piece at `from`. Captures along a queen slide
/// are simultaneous; there is no stop-after-first-capture rule.
pub fn takes_between(
    pieces: &PieceMap,
    from: CubeCoord,
    to: CubeCoord,
    player: Player,
) -> Vec<CubeCoord> {
    for &dir in move_directions(pieces, from, player) {
        let mut line = Vec::new();
        let mut seen = FxHashSet::default();
        let mut cur = from;
        loop {
            let next = match advance(cur, dir) {
                Some(next) => next,
                None => break,
            };
            if next == from || !seen.insert(next) {
                break;
            }
            if next == to {
                return line;
            }
            match pieces.get(&next) {
                Some(piece) if piece.owner == player => break,
                Some(_) => {
                    line.push(next);
                    cur = next;
                }
                None => cur = next,
            }
        }
    }
    Vec::new()
}

/// Every opposing-piece cell the piece at `coord` could capture in one move
/// right now. Built from the generated moves and `takes_between` itself.
pub fn all_threats(pieces: &PieceMap, coord: CubeCoord, player: Player) -> FxHashSet<CubeCoord> {
    let mut threats = FxHashSet::default();
    for dest in destinations(pieces, coord) {
        threats.extend(takes_between(pieces, coord, dest, player));
    }
    threats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use rustc_hash::FxHashMap;

    fn board(cells: &[(CubeCoord, Player, bool)]) -> PieceMap {
        let mut pieces = FxHashMap::default();
        for &(coord, owner, promoted) in cells {
            pieces.insert(coord, Piece { owner, promoted });
        }
        pieces
    }

    #[test]
    fn test_plain_steps_forward_onto_empty() {
        let pieces = board(&[(CubeCoord::new(0, 0, 0), Player::White, false)]);
        let dests = plain_moves(&pieces, CubeCoord::new(0, 0, 0), Player::White);
        assert_eq!(dests.len(), 2);
        assert!(dests.contains(&CubeCoord::new(1, -1, 0)));
        assert!(dests.contains(&CubeCoord::new(1, 0, -1)));
    }

    #[test]
    fn test_plain_blocked_by_friendly() {
        let pieces = board(&[
            (CubeCoord::new(0, 0, 0), Player::White, false),
            (CubeCoord::new(1, -1, 0), Player::White, false),
        ]);
        let dests = plain_moves(&pieces, CubeCoord::new(0, 0, 0), Player::White);
        assert_eq!(dests.len(), 1);
        assert!(dests.contains(&CubeCoord::new(1, 0, -1)));
    }

    #[test]
    fn test_plain_jumps_over_enemy() {
        let pieces = board(&[
            (CubeCoord::new(0, 0, 0), Player::White, false),
            (CubeCoord::new(1, 0, -1), Player::Black, false),
        ]);
        let dests = plain_moves(&pieces, CubeCoord::new(0, 0, 0), Player::White);
        assert!(dests.contains(&CubeCoord::new(2, 0, -2)));
        // the occupied cell itself is not a destination
        assert!(!dests.contains(&CubeCoord::new(1, 0, -1)));
    }

    #[test]
    fn test_plain_step_through_seam() {
        // rank 2 top edge: the raw step is off-board but warps to rank 3's
        // bottom row
        let pieces = board(&[(CubeCoord::new(2, 1, -3), Player::White, false)]);
        let dests = plain_moves(&pieces, CubeCoord::new(2, 1, -3), Player::White);
        assert!(dests.contains(&CubeCoord::new(3, -10, 7)));
        // the other forward step stays on the board
        assert!(dests.contains(&CubeCoord::new(3, 0, -3)));
    }

    #[test]
    fn test_black_moves_toward_rank_zero() {
        let pieces = board(&[(CubeCoord::new(6, -5, -1), Player::Black, false)]);
        let dests = plain_moves(&pieces, CubeCoord::new(6, -5, -1), Player::Black);
        for dest in &dests {
            assert_eq!(dest.x, 5);
        }
    }

    #[test]
    fn test_destinations_empty_for_empty_cell() {
        let pieces = board(&[]);
        assert!(destinations(&pieces, CubeCoord::new(0, 0, 0)).is_empty());
    }

    #[test]
    fn test_queen_slides_all_directions() {
        let pieces = board(&[(CubeCoord::new(4, -5, 1), Player::White, true)]);
        let dests = queen_moves(&pieces, CubeCoord::new(4, -5, 1), Player::White);
        // neighbors in all six directions are reachable
        for dir in DIRECTIONS {
            assert!(dests.contains(&(CubeCoord::new(4, -5, 1) + dir)));
        }
        // and so are distant cells on the same ray
        assert!(dests.contains(&CubeCoord::new(0, -1, 1)));
        assert!(dests.contains(&CubeCoord::new(7, -8, 1)));
    }

    #[test]
    fn test_queen_blocked_by_friendly() {
        // friendly pieces on both arcs of the circular rank-4 ray; the
        // cells behind them stay unreachable
        let pieces = board(&[
            (CubeCoord::new(4, -5, 1), Player::White, true),
            (CubeCoord::new(4, -3, -1), Player::White, false),
            (CubeCoord::new(4, -7, 3), Player::White, false),
        ]);
        let dests = queen_moves(&pieces, CubeCoord::new(4, -5, 1), Player::White);
        assert!(dests.contains(&CubeCoord::new(4, -4, 0)));
        assert!(dests.contains(&CubeCoord::new(4, -6, 2)));
        assert!(!dests.contains(&CubeCoord::new(4, -3, -1)));
        assert!(!dests.contains(&CubeCoord::new(4, -2, -2)));
        assert!(!dests.contains(&CubeCoord::new(4, -8, 4)));
    }

    #[test]
    fn test_queen_passes_over_enemy() {
        let pieces = board(&[
            (CubeCoord::new(4, -5, 1), Player::White, true),
            (CubeCoord::new(4, -3, -1), Player::Black, false),
        ]);
        let dests = queen_moves(&pieces, CubeCoord::new(4, -5, 1), Player::White);
        // the enemy cell is not a landing square, but cells beyond it are
        assert!(!dests.contains(&CubeCoord::new(4, -3, -1)));
        assert!(dests.contains(&CubeCoord::new(4, -2, -2)));
    }

    #[test]
    fn test_queen_ring_terminates() {
        // constant-rank rays are circular through the seam; an unblocked
        // slide must cover the other ten cells of the ring and stop
        let from = CubeCoord::new(4, -5, 1);
        let pieces = board(&[(from, Player::White, true)]);
        let dests = queen_moves(&pieces, from, Player::White);
        let ring: Vec<CubeCoord> = dests.iter().copied().filter(|c| c.x == 4).collect();
        assert_eq!(ring.len(), 10);
        assert!(!dests.contains(&from));
    }

    #[test]
    fn test_takes_between_plain_jump() {
        let pieces = board(&[
            (CubeCoord::new(0, 0, 0), Player::White, false),
            (CubeCoord::new(1, 0, -1), Player::Black, false),
        ]);
        let taken = takes_between(
            &pieces,
            CubeCoord::new(0, 0, 0),
            CubeCoord::new(2, 0, -2),
            Player::White,
        );
        assert_eq!(taken, vec![CubeCoord::new(1, 0, -1)]);
    }

    #[test]
    fn test_takes_between_plain_step_is_empty() {
        let pieces = board(&[(CubeCoord::new(0, 0, 0), Player::White, false)]);
        let taken = takes_between(
            &pieces,
            CubeCoord::new(0, 0, 0),
            CubeCoord::new(1, -1, 0),
            Player::White,
        );
        assert!(taken.is_empty());
    }

    #[test]
    fn test_takes_between_queen_collects_all_on_line() {
        let pieces = board(&[
            (CubeCoord::new(4, -9, 5), Player::White, true),
            (CubeCoord::new(4, -7, 3), Player::Black, false),
            (CubeCoord::new(4, -5, 1), Player::Black, false),
        ]);
        let taken = takes_between(
            &pieces,
            CubeCoord::new(4, -9, 5),
            CubeCoord::new(4, -3, -1),
            Player::White,
        );
        assert_eq!(taken.len(), 2);
        assert!(taken.contains(&CubeCoord::new(4, -7, 3)));
        assert!(taken.contains(&CubeCoord::new(4, -5, 1)));
    }

    #[test]
    fn test_threats_match_takes_between() {
        let pieces = board(&[
            (CubeCoord::new(4, -9, 5), Player::White, true),
            (CubeCoord::new(4, -7, 3), Player::Black, false),
            (CubeCoord::new(2, -7, 5), Player::Black, false),
            (CubeCoord::new(5, -9, 4), Player::White, false),
        ]);
        let coord = CubeCoord::new(4, -9, 5);
        let threats = all_threats(&pieces, coord, Player::White);

        // every threat is an opposing piece reachable through some move
        let dests = destinations(&pieces, coord);
        for threat in &threats {
            assert_eq!(pieces[threat].owner, Player::Black);
            let covered = dests
                .iter()
                .any(|&d| takes_between(&pieces, coord, d, Player::White).contains(threat));
            assert!(covered, "threat {:?} not backed by a move", threat);
        }
        assert!(threats.contains(&CubeCoord::new(4, -7, 3)));
        // the friendly piece is never a threat
        assert!(!threats.contains(&CubeCoord::new(5, -9, 4)));
    }

    #[test]
    fn test_dead_end_direction_contributes_nothing() {
        // black on rank 0: both forward steps leave the board where no warp
        // band is defined
        let pieces = board(&[(CubeCoord::new(0, -8, 8), Player::Black, false)]);
        let dests = plain_moves(&pieces, CubeCoord::new(0, -8, 8), Player::Black);
        // black at rank 0 has no forward ranks left; nothing is generated
        assert!(dests.is_empty());
    }
}

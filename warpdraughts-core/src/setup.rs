//! Starting positions

use crate::board::CubeCoord;
use crate::pieces::Player;

/// Standard board depth: eight double rows per side
pub const DEFAULT_DEPTH: u32 = 8;

/// Starting cells for both sides: two white cells per row index at ranks 0
/// and 1, two black cells at ranks 6 and 7, `2 * depth` cells per side.
pub fn starting_position(depth: u32) -> Vec<(CubeCoord, Player)> {
    let mut cells = Vec::with_capacity(depth as usize * 4);
    for i in 0..depth as i32 {
        cells.push((CubeCoord::new(0, -i, i), Player::White));
        cells.push((CubeCoord::new(1, -i, i - 1), Player::White));
        cells.push((CubeCoord::new(6, -i - 3, i - 3), Player::Black));
        cells.push((CubeCoord::new(7, -i - 3, i - 4), Player::Black));
    }
    debug_assert!(
        cells.iter().all(|(coord, _)| coord.is_valid()),
        "depth {} overruns the board",
        depth
    );
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_depth_counts() {
        let cells = starting_position(DEFAULT_DEPTH);
        let whites = cells.iter().filter(|(_, p)| *p == Player::White).count();
        let blacks = cells.iter().filter(|(_, p)| *p == Player::Black).count();
        assert_eq!(whites, 16);
        assert_eq!(blacks, 16);
    }

    #[test]
    fn test_all_cells_valid_and_unique() {
        let cells = starting_position(DEFAULT_DEPTH);
        let mut seen = FxHashSet::default();
        for (coord, _) in &cells {
            assert!(coord.is_valid(), "invalid starting cell {:?}", coord);
            assert!(seen.insert(*coord), "duplicate starting cell {:?}", coord);
        }
    }

    #[test]
    fn test_sides_on_their_ranks() {
        for (coord, player) in starting_position(DEFAULT_DEPTH) {
            match player {
                Player::White => assert!(coord.x == 0 || coord.x == 1),
                Player::Black => assert!(coord.x == 6 || coord.x == 7),
            }
        }
    }
}

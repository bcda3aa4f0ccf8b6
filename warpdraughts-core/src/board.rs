//! Hex board geometry: cube coordinates, validity bands, and the warp seam

use serde::{Deserialize, Serialize};
use std::ops::{Add, RangeInclusive, Sub};
use thiserror::Error;

/// Back rank for white (promotion rank); black promotes at rank 0
pub const WHITE_BACK_RANK: i32 = 7;
pub const BLACK_BACK_RANK: i32 = 0;

/// Cube coordinates over the hex grid, x + y + z = 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Why a coordinate is not a playable cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("coordinates ({0}, {1}, {2}) do not sum to zero")]
    OffLattice(i32, i32, i32),
    #[error("coordinates ({0}, {1}, {2}) fall outside the board")]
    OutOfRange(i32, i32, i32),
}

impl CubeCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0);
        Self { x, y, z }
    }

    /// Checked constructor distinguishing a lattice violation from an
    /// out-of-range cell
    pub fn try_new(x: i32, y: i32, z: i32) -> Result<Self, CoordError> {
        if x + y + z != 0 {
            return Err(CoordError::OffLattice(x, y, z));
        }
        let coord = Self { x, y, z };
        if !coord.in_range() {
            return Err(CoordError::OutOfRange(x, y, z));
        }
        Ok(coord)
    }

    /// Check if this coordinate is a playable cell
    pub fn is_valid(&self) -> bool {
        self.x + self.y + self.z == 0 && self.in_range()
    }

    fn in_range(&self) -> bool {
        rank_span(self.x).map_or(false, |span| span.contains(&self.y))
    }

    /// Hex distance between two cells
    pub fn distance_to(&self, other: CubeCoord) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        dx.max(dy).max(dz)
    }

    /// True when this vector lies along `dir`: colinear (zero cross product)
    /// and sign-compatible. Colinearity alone cannot tell D from -D; the sign
    /// rule rejects any component pair pointing in opposite directions.
    pub fn is_aligned_with(&self, dir: Direction) -> bool {
        let cross = (
            self.y * dir.dz - self.z * dir.dy,
            self.z * dir.dx - self.x * dir.dz,
            self.x * dir.dy - self.y * dir.dx,
        );
        if cross != (0, 0, 0) {
            return false;
        }
        let pairs = [(self.x, dir.dx), (self.y, dir.dy), (self.z, dir.dz)];
        pairs.iter().all(|&(v, d)| !(v < 0 && 0 < d) && !(d < 0 && 0 < v))
    }
}

impl Add<Direction> for CubeCoord {
    type Output = CubeCoord;

    fn add(self, dir: Direction) -> CubeCoord {
        CubeCoord::new(self.x + dir.dx, self.y + dir.dy, self.z + dir.dz)
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    fn add(self, other: CubeCoord) -> CubeCoord {
        CubeCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for CubeCoord {
    type Output = CubeCoord;

    fn sub(self, other: CubeCoord) -> CubeCoord {
        CubeCoord::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Permitted y band for a rank, `None` off the board
pub fn rank_span(x: i32) -> Option<RangeInclusive<i32>> {
    match x {
        0 => Some(-8..=2),
        1 | 2 => Some(-9..=1),
        3 | 4 => Some(-10..=0),
        5 | 6 => Some(-11..=-1),
        7 => Some(-12..=-2),
        _ => None,
    }
}

/// One of the six hex directions as a unit cube vector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl Direction {
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        debug_assert!(dx + dy + dz == 0);
        Self { dx, dy, dz }
    }
}

/// The six hex-neighbor directions. The first two advance x (white's
/// forward pair), indices 3 and 4 retreat it (black's forward pair).
pub const DIRECTIONS: [Direction; 6] = [
    Direction::new(1, -1, 0),
    Direction::new(1, 0, -1),
    Direction::new(0, 1, -1),
    Direction::new(-1, 1, 0),
    Direction::new(-1, 0, 1),
    Direction::new(0, -1, 1),
];

/// Seam translations: band A maps down the board, band B maps back up
const SEAM_A_OFFSET: CubeCoord = CubeCoord::new(0, -11, 11);
const SEAM_B_OFFSET: CubeCoord = CubeCoord::new(0, 11, -11);

/// Seam-translated coordinate for `coord`, when it lies in one of the two
/// warp bands. Warping can land outside the playable range; callers must
/// re-validate the result.
pub fn warp(coord: CubeCoord) -> Option<CubeCoord> {
    if (1..=7).contains(&coord.x) && (-1..=2).contains(&coord.y) {
        Some(coord + SEAM_A_OFFSET)
    } else if (0..=6).contains(&coord.x) && (-12..=-9).contains(&coord.y) {
        Some(coord + SEAM_B_OFFSET)
    } else {
        None
    }
}

/// The unique hex direction along which `b - a` lies, or `None` when the
/// two cells are not aligned (or equal)
pub fn direction_between(a: CubeCoord, b: CubeCoord) -> Option<Direction> {
    if a == b {
        return None;
    }
    let delta = b - a;
    DIRECTIONS.iter().copied().find(|&dir| delta.is_aligned_with(dir))
}

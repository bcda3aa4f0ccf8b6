//! Scoring formulas

use std::f64::consts::PI;

/// Score for a move capturing `taken` pieces: 100 * 2^taken
pub fn takes_score(taken: u32) -> u64 {
    100u64 << taken
}

/// End-of-game bonus from the winner's remaining pieces and queens
pub fn pieces_bonus(pieces_left: u32, queens: u32) -> u64 {
    let mixed = queens ^ pieces_left;
    if mixed > pieces_left {
        100u64 << mixed
    } else {
        100u64 << queens
    }
}

/// Bonus for the seconds spent before playing. Quick moves are rewarded
/// polynomially; past 30 seconds only the modular remainder counts.
pub fn time_bonus(seconds: f64) -> u64 {
    let points = if seconds <= 30.0 {
        seconds.powf(PI)
    } else {
        seconds % PI
    };
    points.ceil() as u64
}

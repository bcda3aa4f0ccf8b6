//! Show command - print a board as text
//!
//! Rendering is driver-side presentation; the engine exposes only a read
//! view of its pieces.

use anyhow::Result;
use clap::Args;
use warpdraughts_core::{rank_span, CubeCoord, Match, Piece, Player, DEFAULT_DEPTH};

#[derive(Args)]
pub struct ShowArgs {
    /// Board depth (double rows of pieces per side)
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let game = Match::new(args.depth);
    print!("{}", render(&game));
    Ok(())
}

/// Render one rank per line, highest cell first, skewed for the hex layout
pub fn render(game: &Match) -> String {
    let mut out = String::new();
    for x in 0..=7 {
        let span = match rank_span(x) {
            Some(span) => span,
            None => continue,
        };
        out.push_str(&" ".repeat(x as usize));
        for y in span.rev() {
            out.push(symbol(game.piece_at(CubeCoord::new(x, y, -x - y))));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn symbol(piece: Option<&Piece>) -> char {
    match piece {
        None => '.',
        Some(p) => match (p.owner, p.promoted) {
            (Player::White, false) => 'w',
            (Player::White, true) => 'W',
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
        },
    }
}

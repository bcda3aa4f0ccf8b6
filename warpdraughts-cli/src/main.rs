//! Warpdraughts CLI - drive matches from the terminal
//!
//! Commands:
//! - play: random-vs-random matches
//! - show: print the starting board

use clap::{Parser, Subcommand};

mod play;
mod show;

#[derive(Parser)]
#[command(name = "warpdraughts")]
#[command(about = "Warp-seam hex draughts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play random-vs-random matches
    Play(play::PlayArgs),
    /// Print the starting board for a depth
    Show(show::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Show(args) => show::run(args),
    }
}

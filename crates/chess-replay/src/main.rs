//! Chess Replay - Plays a recorded game through the rules engine.
//!
//! Reads a TOML game file, applies each move with full legality checking,
//! optionally takes moves back, and prints the final position.

mod config;

use anyhow::Context;
use clap::Parser;
use config::GameFile;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chess Replay - Validates and replays a recorded game.
#[derive(Parser)]
#[command(name = "chess-replay")]
#[command(about = "Replays a recorded chess game and reports its final status")]
struct Args {
    /// Path to the TOML game file
    game: PathBuf,

    /// Print the final session (position and undo stack) as JSON
    #[arg(long)]
    json: bool,

    /// Number of moves to take back after replaying
    #[arg(long, default_value = "0")]
    undo: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    tracing::info!("Game file: {:?}", args.game);
    let file = GameFile::load(&args.game)
        .with_context(|| format!("loading {}", args.game.display()))?;
    let mut game = file.new_game()?;

    for (index, uci) in file.moves.iter().enumerate() {
        let ply = index + 1;
        let status = game
            .make_move_uci(uci)
            .with_context(|| format!("ply {} ({}) in {}", ply, uci, game.to_fen()))?;
        tracing::info!(ply, mov = %uci, %status, "played");
    }

    for _ in 0..args.undo {
        let record = game
            .undo()
            .with_context(|| format!("--undo {} exceeds the {} plies played", args.undo, file.moves.len()))?;
        tracing::info!(mov = %record.mov, plies = game.ply_count(), "took back");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        println!("{}", game.to_fen());
        match game.winner() {
            Some(color) => println!("{} ({} wins)", game.status(), color),
            None => println!("{}", game.status()),
        }
    }

    Ok(())
}

//! UCT-Go: a Monte Carlo Tree Search Go engine.
//!
//! ## Usage
//!
//! - `uct-go` - Run a short self-play demo
//! - `uct-go gtp` - Start the GTP server for GUI integration
//! - `uct-go demo --playouts 5000` - Demo with a custom search effort

use anyhow::Result;
use clap::{Parser, Subcommand};

use uct_go::board::{Board, Player, parse_coord, str_coord};
use uct_go::config::UctConfig;
use uct_go::constants::RESIGN_MOVE;
use uct_go::gtp::GtpEngine;
use uct_go::uct::UctEngine;

/// UCT-Go: a Monte Carlo Tree Search Go engine
#[derive(Parser)]
#[command(name = "uct-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Run a short demo of the engine
    Demo {
        /// Playouts to spend on the demo move
        #[arg(long, default_value_t = 2000)]
        playouts: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp) => GtpEngine::new().run(),
        Some(Commands::Demo { playouts }) => run_demo(playouts),
        None => run_demo(2000),
    }
}

fn run_demo(playouts: usize) -> Result<()> {
    println!("UCT-Go: Monte Carlo Tree Search Go engine\n");

    let mut board = Board::new();
    board.play_legal(Player::Black, parse_coord("C3"));
    board.play_legal(Player::White, parse_coord("G7"));
    println!("{board}");

    let config = UctConfig {
        genmove_playouts: playouts,
        ..UctConfig::default()
    };

    println!("Running {playouts} playouts for Black...");
    let best = {
        let mut engine = UctEngine::new(&board, config);
        engine.genmove(Player::Black)
    };
    println!("Best move: {}", str_coord(best));

    if best != RESIGN_MOVE {
        board.play_legal(Player::Black, best);
        println!("{board}");
    }
    Ok(())
}

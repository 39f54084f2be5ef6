//! Tic-tac-toe against a perfect engine
//!
//! ## Usage
//!
//! - `tictactoe` - Open the game window
//! - `tictactoe text` - Play in the terminal
//! - `tictactoe --size 4 --human-first text` - 4x4 board, human opens as X

use std::io;

use anyhow::anyhow;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe::cli::TextGame;
use tictactoe::ui::TicTacToeApp;
use tictactoe::{Cell, EngineConfig, MemoPolicy, MAX_BOARD_SIZE};

/// Tic-tac-toe on an N×N board against an exhaustive minimax engine
#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rows and columns of the board
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=MAX_BOARD_SIZE as i64))]
    size: u8,

    /// Play X and move first (the engine opens otherwise)
    #[arg(long)]
    human_first: bool,

    /// How the engine memoizes search results
    #[arg(long, value_enum, default_value_t = MemoArg::Exact)]
    memo: MemoArg,

    /// Log search details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the game window (default)
    Gui,
    /// Play in the terminal
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum MemoArg {
    /// Key entries on the exact alpha-beta window
    Exact,
    /// Share entries across windows using bound flags
    Bound,
}

impl From<MemoArg> for MemoPolicy {
    fn from(arg: MemoArg) -> Self {
        match arg {
            MemoArg::Exact => MemoPolicy::ExactWindow,
            MemoArg::Bound => MemoPolicy::BoundAware,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let human = if cli.human_first { Cell::X } else { Cell::O };
    let config = EngineConfig::new(cli.size as usize, human, cli.memo.into())?;
    if config.size() > 3 {
        info!(size = config.size(), "large board: the first engine move may take a while");
    }

    match cli.command {
        Some(Commands::Text) => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            TextGame::new(config, stdin, stdout).run()?;
        }
        Some(Commands::Gui) | None => run_gui(config)?,
    }

    Ok(())
}

fn run_gui(config: EngineConfig) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 560.0])
            .with_min_inner_size([600.0, 420.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| Ok(Box::new(TicTacToeApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}

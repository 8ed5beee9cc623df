//! Chess rules CLI
//!
//! List legal moves, classify positions, play move sequences, run perft and
//! check a search device's reply against the rules.

mod config;
mod device;
mod report;
mod shell;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chess_rules::{Game, SearchRequest, divide, perft, request_move};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use device::CapturedOutput;
use report::{
    DivideEntry, MovesReport, PerftReport, PlayReport, ReplyReport, StatusReport, status_name,
};
use shell::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Starting position plus moves to apply before the command runs.
#[derive(Args, Debug)]
struct PositionArgs {
    /// Starting FEN (default: config start_fen)
    #[arg(long)]
    fen: Option<String>,

    /// Moves in coordinate text, e.g. e2e4 e7e8q
    moves: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List legal moves
    Moves(PositionArgs),
    /// Classify the position
    Status(PositionArgs),
    /// Apply moves and print the resulting FEN
    Play(PositionArgs),
    /// Count leaf nodes to a fixed depth
    Perft {
        /// Depth (default: config perft_depth)
        #[arg(short, long)]
        depth: Option<u8>,
        /// Print per-move subtotals
        #[arg(long)]
        divide: bool,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Draw the board
    Board(PositionArgs),
    /// Read search-device output from stdin and play its move
    Reply {
        /// Thinking time to put in the request (default: config think_time_ms)
        #[arg(long)]
        think_time_ms: Option<u64>,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Interactive session on stdin
    Shell(PositionArgs),
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    init_logging(cli.log.as_deref().unwrap_or(&config.log_filter));
    let json = cli.json || config.json;

    match cli.command {
        Command::Moves(pos) => {
            let game = load_game(&pos, &config)?;
            let report = MovesReport::new(game.board(), &game.legal_moves());
            emit(json, &report, || report.moves.join("\n"))
        }
        Command::Status(pos) => {
            let game = load_game(&pos, &config)?;
            let report = StatusReport::new(game.board(), game.status(), game.legal_moves().len());
            emit(json, &report, || report.status.to_string())
        }
        Command::Play(pos) => {
            let game = load_game(&pos, &config)?;
            let report = PlayReport {
                played: game.moves().map(|m| m.to_string()).collect(),
                fen: game.fen(),
                status: status_name(game.status()),
            };
            emit(json, &report, || report.fen.clone())
        }
        Command::Perft {
            depth,
            divide: split,
            position,
        } => {
            let game = load_game(&position, &config)?;
            let depth = depth.unwrap_or(config.perft_depth);
            let mut board = game.board().clone();
            let start = Instant::now();
            let (nodes, entries) = if split {
                let mut entries: Vec<DivideEntry> = divide(&mut board, depth)
                    .into_iter()
                    .map(|(mv, nodes)| DivideEntry {
                        mv: mv.to_string(),
                        nodes,
                    })
                    .collect();
                entries.sort_by(|a, b| a.mv.cmp(&b.mv));
                (entries.iter().map(|e| e.nodes).sum(), Some(entries))
            } else {
                (perft(&mut board, depth), None)
            };
            let elapsed = start.elapsed();
            info!(depth, nodes, ?elapsed, "perft finished");

            let report = PerftReport {
                fen: game.fen(),
                depth,
                nodes,
                elapsed_ms: elapsed.as_millis(),
                divide: entries,
            };
            emit(json, &report, || {
                let mut text = String::new();
                for entry in report.divide.iter().flatten() {
                    text.push_str(&format!("{}: {}\n", entry.mv, entry.nodes));
                }
                if report.divide.is_some() {
                    text.push('\n');
                }
                text.push_str(&format!("Nodes searched: {}", report.nodes));
                text
            })
        }
        Command::Board(pos) => {
            let game = load_game(&pos, &config)?;
            println!("{}", game.board());
            Ok(())
        }
        Command::Reply {
            think_time_ms,
            position,
        } => {
            let mut game = load_game(&position, &config)?;
            let think_time = Duration::from_millis(think_time_ms.unwrap_or(config.think_time_ms));
            let request = SearchRequest::new(game.board(), think_time).command_line();
            let mut device = CapturedOutput::new(io::stdin().lock());
            let (mv, evaluation) = request_move(&mut game, &mut device, think_time)
                .context("device reply rejected")?;
            let report = ReplyReport {
                request,
                mv: mv.to_string(),
                evaluation,
                fen: game.fen(),
                status: status_name(game.status()),
            };
            emit(json, &report, || format!("{} {}", report.mv, report.fen))
        }
        Command::Shell(pos) => {
            let game = load_game(&pos, &config)?;
            Shell::new(game).run(io::stdin().lock(), io::stdout().lock())
        }
    }
}

/// Build the starting game from `--fen` (or the configured start) and the
/// trailing move list.
fn load_game(pos: &PositionArgs, config: &CliConfig) -> Result<Game> {
    let fen = pos.fen.as_deref().unwrap_or(&config.start_fen);
    let mut game = Game::from_fen(fen).with_context(|| format!("loading FEN {fen:?}"))?;
    for text in &pos.moves {
        game.play_text(text)
            .with_context(|| format!("applying {text} to {}", game.fen()))?;
    }
    Ok(game)
}

fn emit<T: Serialize>(json: bool, report: &T, text: impl FnOnce() -> String) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, report).context("writing JSON")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", text())?;
    }
    Ok(())
}

mod app;

use ai::{SearchConfig, DEFAULT_DEPTH};
use app::{ChessApp, GameSettings};
use clap::{Parser, ValueEnum};
use engine::{Board, BLACK, STARTING_FEN, WHITE};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

#[derive(Parser, Debug)]
#[command(about = "Play chess against a fixed-depth alpha-beta engine")]
struct Args {
    /// Search depth of the engine in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Color played by the human
    #[arg(long, value_enum, default_value_t = Side::White)]
    play_as: Side,

    /// Start from this position instead of the standard one
    #[arg(long)]
    fen: Option<String>,

    /// Record the full search trace in the game log
    #[arg(long)]
    trace: bool,

    /// Directory game logs are written to
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start_fen = args.fen.unwrap_or_else(|| STARTING_FEN.to_string());
    let board = Board::from_fen(&start_fen)?;

    let settings = GameSettings {
        human_color: match args.play_as {
            Side::White => WHITE,
            Side::Black => BLACK,
        },
        start_fen,
        search: SearchConfig {
            advanced_logging: args.trace,
            ..SearchConfig::with_depth(args.depth)
        },
        log_dir: args.log_dir,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1040.0, 800.0])
            .with_title("Chess Engine"),
        ..Default::default()
    };

    eframe::run_native(
        "Chess Engine",
        options,
        Box::new(|_cc| Ok(Box::new(ChessApp::new(board, settings)))),
    )
    .map_err(|err| anyhow::anyhow!("UI failed: {}", err))
}

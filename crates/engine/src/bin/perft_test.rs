use anyhow::{bail, Result};
use clap::Parser;
use engine::perft::*;
use engine::Board;

#[derive(Parser, Debug)]
#[command(about = "Validate move generation against reference perft counts")]
struct Args {
    /// Deepest ply to check for each position
    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Only run reference positions whose name contains this text
    #[arg(short, long)]
    position: Option<String>,

    /// Print a per-move breakdown for this FEN instead of running the suite
    #[arg(long)]
    divide: Option<String>,

    /// Print capture, castle and check statistics for this FEN at the given depth
    #[arg(long)]
    detailed: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(fen) = args.divide {
        let mut board = Board::from_fen(&fen)?;
        let results = perft_divide(&mut board, args.depth);
        for (mv, nodes) in &results {
            println!("{}: {}", mv, nodes);
        }
        println!("Total: {}", results.iter().map(|(_, nodes)| nodes).sum::<u64>());
        return Ok(());
    }

    if let Some(fen) = args.detailed {
        let mut board = Board::from_fen(&fen)?;
        let result = perft_detailed(&mut board, args.depth);
        println!("Nodes:      {}", result.nodes);
        println!("Captures:   {}", result.captures);
        println!("En passant: {}", result.en_passant);
        println!("Castles:    {}", result.castles);
        println!("Promotions: {}", result.promotions);
        println!("Checks:     {}", result.checks);
        println!("Checkmates: {}", result.checkmates);
        println!("Time:       {}ms ({} nodes/s)", result.time_ms, result.nodes_per_second());
        return Ok(());
    }

    println!("🚀 Perft depth {}", args.depth);
    println!("{}", "=".repeat(60));

    let mut failures = 0;
    for test_case in PERFT_POSITIONS {
        if let Some(filter) = &args.position {
            if !test_case.name.to_lowercase().contains(&filter.to_lowercase()) {
                continue;
            }
        }

        println!("\n🏁 {}", test_case.name);
        for outcome in run_position_tests(test_case, args.depth)? {
            let status = if outcome.passed() { "✅ PASS" } else { "❌ FAIL" };
            println!(
                "{} depth {}: {} nodes (expected {}) in {}ms",
                status, outcome.depth, outcome.nodes, outcome.expected, outcome.time_ms
            );
            if !outcome.passed() {
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} perft checks failed", failures);
    }
    println!("\n🎉 All perft checks passed");
    Ok(())
}

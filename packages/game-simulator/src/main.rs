//! Session simulator CLI.
//!
//! Runs guessing sessions entirely in memory against the real engine,
//! racing bot guesses to exercise the optimistic commit path at speed.

mod simulator;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use engine::config::EngineConfig;
use engine::domain::rules::WinCondition;
use simulator::{SessionResult, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "game-simulator")]
#[command(about = "In-memory guessing session simulator")]
struct Args {
    /// Number of sessions to simulate
    #[arg(short, long, default_value = "1")]
    sessions: u32,

    /// Bots per session
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u32).range(2..=64))]
    players: u32,

    /// Win condition for every session
    #[arg(long, default_value = "fixed-rounds")]
    win: WinArg,

    /// Rounds per session (fixed-rounds) or points to win (score-threshold)
    #[arg(long, default_value = "5")]
    goal: u32,

    /// Base seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WinArg {
    FixedRounds,
    ScoreThreshold,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only show warnings and errors
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let win_condition = match args.win {
        WinArg::FixedRounds => WinCondition::FixedRounds {
            max_rounds: args.goal,
        },
        WinArg::ScoreThreshold => WinCondition::ScoreThreshold {
            target_score: args.goal,
        },
    };
    let config = EngineConfig {
        win_condition,
        ..EngineConfig::default()
    };
    let base_seed: u64 = args.seed.unwrap_or_else(rand::random);

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;
    for session_num in 0..args.sessions {
        let mut sim = Simulator::new(
            config.clone(),
            args.players as usize,
            base_seed.wrapping_add(u64::from(session_num)),
        );
        match sim.run_session().await {
            Ok(result) => {
                if args.verbose {
                    info!(
                        session = session_num,
                        winner = result.winner.as_deref().unwrap_or("-"),
                        rounds = result.rounds_played,
                        guesses = result.guesses_submitted,
                        "session finished"
                    );
                }
                results.push(result);
            }
            Err(err) => {
                errors += 1;
                warn!(session = session_num, error = %err, "session failed");
            }
        }
    }

    print_summary(&results, errors, start.elapsed(), args.sessions);
    Ok(())
}

fn print_summary(results: &[SessionResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Sessions completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }

    let mut wins: BTreeMap<&str, u32> = BTreeMap::new();
    let mut guesses = 0u64;
    let mut rounds = 0u64;
    let mut skipped = 0u64;
    for result in results {
        if let Some(winner) = result.winner.as_deref() {
            *wins.entry(winner).or_insert(0) += 1;
        }
        guesses += result.guesses_submitted;
        rounds += u64::from(result.rounds_played);
        skipped += u64::from(result.rounds_skipped);
    }
    println!("Guesses submitted: {guesses}");
    println!(
        "Average rounds per session: {:.1}",
        rounds as f64 / results.len() as f64
    );
    if skipped > 0 {
        println!("Rounds skipped: {skipped}");
    }

    println!("\n=== Wins by Bot ===");
    for (bot, count) in wins {
        let rate = (count as f64 / results.len() as f64) * 100.0;
        println!("{bot}: {count} ({rate:.1}%)");
    }
}

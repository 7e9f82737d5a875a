//! Tilt Catch headless runner
//!
//! Plays one session with the demo autopilot, optionally submits the final
//! score to a JSON leaderboard and prints the ranking.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release -- --seed 42 --leaderboard scores.json --nickname ala

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tilt_catch::audio::{AudioManager, LogAudio};
use tilt_catch::consts::SIM_DT_MS;
use tilt_catch::leaderboard::{LeaderboardBackend, ranked_lines};
use tilt_catch::renderer::LogRenderer;
use tilt_catch::{FileLeaderboard, FrameOutcome, Game, Settings};

#[derive(Parser)]
#[command(name = "tilt-catch")]
#[command(about = "Run a tilt-catch session driven by the demo autopilot")]
struct Args {
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many simulation ticks if the session is still running
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_ticks: u64,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Leaderboard JSON file
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Nickname to submit the final score under
    #[arg(long)]
    nickname: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let seed = match args.seed {
        Some(seed) => seed,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_millis() as u64,
    };

    let audio = AudioManager::with_settings(Box::new(LogAudio), &settings);
    let mut game = Game::new(seed, &settings, Box::new(LogRenderer::new()), audio);
    game.set_idle_mode(true);

    let mut final_score = None;
    for _ in 0..args.max_ticks {
        if let FrameOutcome::GameOver { final_score: score } = game.step() {
            final_score = Some(score);
            break;
        }
    }

    let state = game.state();
    println!("Seed:   {seed}");
    println!("Ticks:  {}", state.time_ticks);
    println!("Time:   {:.1}s", (state.time_ticks * SIM_DT_MS) as f64 / 1000.0);
    println!("Score:  {}", state.score);
    println!("Lives:  {}", state.lives);

    let Some(score) = final_score else {
        println!("Session still running after {} ticks", args.max_ticks);
        return Ok(());
    };
    println!("GAME OVER - final score {score}");

    let Some(path) = args.leaderboard else {
        return Ok(());
    };
    let mut board = FileLeaderboard::new(path);

    if let (Some(nickname), Some(mut submission)) = (args.nickname, game.submission()) {
        submission
            .submit(&nickname, &mut board)
            .with_context(|| format!("submitting score to {}", board.path().display()))?;
    }

    let entries = board
        .fetch()
        .with_context(|| format!("reading {}", board.path().display()))?;
    println!();
    println!("=== LEADERBOARD ===");
    for line in ranked_lines(entries) {
        println!("  {line}");
    }
    Ok(())
}

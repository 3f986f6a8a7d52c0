//! Self-play training entry point, wired up the way the teacher's own `main` wires
//! its LTP server: `dotenvy` for environment, `clap` for options, `flexi_logger` for
//! output, `anyhow` at the very top for a single place to report a fatal error.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};

use contrast::train::{Opponent, Trainer, TrainerConfig};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OpponentArg {
    SelfPlay,
    Greedy,
    RuleBased,
}

impl From<OpponentArg> for Opponent {
    fn from(value: OpponentArg) -> Opponent {
        match value {
            OpponentArg::SelfPlay => Opponent::SelfPlay,
            OpponentArg::Greedy => Opponent::Greedy,
            OpponentArg::RuleBased => Opponent::RuleBased,
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(name = "contrast-train", about = "Trains the N-tuple evaluator by self-play")]
struct TrainOptions {
    /// Total number of self-play games to run across all worker threads.
    #[arg(long, default_value_t = 10_000)]
    games: u32,

    /// Ply cap per game before it is scored as a draw.
    #[arg(long, default_value_t = 500)]
    turns: u32,

    /// Learning rate at the start of training.
    #[arg(long, default_value_t = 0.1)]
    lr_max: f32,

    /// Learning rate once training has fully decayed.
    #[arg(long, default_value_t = 0.005)]
    lr_min: f32,

    /// Exploration rate for the learner's own move choices.
    #[arg(long, default_value_t = 0.1)]
    epsilon: f32,

    /// Which opponent to train against; `self-play` starts at `greedy` and promotes
    /// automatically as the rolling win rate clears `promotion-win-rate`.
    #[arg(long, value_enum, default_value_t = OpponentArg::SelfPlay)]
    opponent: OpponentArg,

    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Games between checkpoint writes. `0` disables intermediate checkpoints.
    #[arg(long, default_value_t = 500)]
    save_interval: u32,

    #[arg(long, default_value = "weights.bin")]
    output: PathBuf,

    /// Resume from an existing checkpoint instead of a fresh network.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Games between swapping which colour the learner plays.
    #[arg(long, default_value_t = 10_000)]
    role_swap_every: u32,

    /// Rolling win rate required, over `rolling-window` games, to promote to the next
    /// curriculum stage.
    #[arg(long, default_value_t = 0.55)]
    promotion_win_rate: f32,

    #[arg(long, default_value_t = 1000)]
    rolling_window: usize,

    #[arg(short, long)]
    log_level: Option<String>,
}

/// Joins a relative checkpoint path onto `CONTRAST_CHECKPOINT_DIR` when that
/// environment variable is set and the path itself carries no directory component;
/// an explicit `--output`/`--load` directory always wins.
fn resolve_checkpoint_path(path: PathBuf) -> PathBuf {
    if path.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    match std::env::var_os("CONTRAST_CHECKPOINT_DIR") {
        Some(dir) => PathBuf::from(dir).join(path),
        None => path,
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv()?;
    let mut options = TrainOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or_else(|| "info".into()))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            false => AdaptiveFormat::Default,
        })
        .start()?;

    options.output = resolve_checkpoint_path(options.output);
    options.load = options.load.map(resolve_checkpoint_path);

    let output = options.output.clone();
    let config = TrainerConfig {
        games: options.games,
        turn_cap: options.turns,
        lr_max: options.lr_max,
        lr_min: options.lr_min,
        epsilon: options.epsilon,
        opponent: options.opponent.into(),
        threads: options.threads,
        save_interval: options.save_interval,
        output: options.output,
        load: options.load,
        role_swap_every: options.role_swap_every,
        promotion_win_rate: options.promotion_win_rate,
        rolling_window: options.rolling_window,
    };

    log::info!(
        "starting self-play training: {} games across {} thread(s)",
        config.games,
        config.threads
    );
    let trainer = Trainer::new(config);
    trainer.run()?;
    log::info!("training complete, weights written to {}", output.display());
    Ok(())
}

//! Pits a trained network, searching with MCTS, against a fixed baseline opponent
//! over a batch of games and reports the resulting win rate.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};

use contrast::core::consts::Player;
use contrast::core::rules::{apply_move, is_win, legal_moves};
use contrast::core::state::GameState;
use contrast::eval::network::Network;
use contrast::eval::persistence;
use contrast::mcts::Mcts;
use contrast::policy::{GreedyPolicy, Policy, RandomPolicy, RuleBasedPolicy};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OpponentArg {
    Greedy,
    RuleBased,
    Random,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "contrast-eval", about = "Evaluates a trained network against a baseline opponent")]
struct EvalOptions {
    #[arg(long)]
    weights: PathBuf,

    #[arg(long, default_value_t = 100)]
    games: u32,

    #[arg(long, value_enum, default_value_t = OpponentArg::Greedy)]
    opponent: OpponentArg,

    /// MCTS iterations spent per move for the network's side.
    #[arg(long, default_value_t = 200)]
    iterations: u32,

    #[arg(long, default_value_t = 200)]
    turn_cap: u32,

    /// Alternate which colour the network plays every other game.
    #[arg(long, default_value_t = false)]
    swap_colors: bool,

    #[arg(short, long)]
    log_level: Option<String>,
}

fn opponent_policy(arg: OpponentArg) -> Box<dyn Policy> {
    match arg {
        OpponentArg::Greedy => Box::new(GreedyPolicy),
        OpponentArg::RuleBased => Box::new(RuleBasedPolicy),
        OpponentArg::Random => Box::new(RandomPolicy),
    }
}

fn play_one(
    network: &Network,
    opponent: &dyn Policy,
    network_seat: Player,
    iterations: u32,
    turn_cap: u32,
    rng: &mut dyn rand::RngCore,
) -> Option<Player> {
    let mut state = GameState::initial();

    for _ in 0..turn_cap {
        if is_win(&state, Player::Black) {
            return Some(Player::Black);
        }
        if is_win(&state, Player::White) {
            return Some(Player::White);
        }
        if legal_moves(&state).is_empty() {
            return Some(state.to_move.opponent());
        }

        let mv = if state.to_move == network_seat {
            let mut mcts = Mcts::new(state);
            mcts.run_iterations(iterations, network, rng);
            mcts.best_move()
        } else {
            opponent.select_move(&state, rng)
        }
        .expect("legal_moves was checked non-empty above");

        state = apply_move(&state, &mv);
    }

    None
}

/// Joins a relative checkpoint path onto `CONTRAST_CHECKPOINT_DIR` when that
/// environment variable is set and the path itself carries no directory component;
/// an explicit directory in `--weights` always wins. Mirrors `train.rs`'s resolution
/// so a run's `--output` and a later `evaluate` run's `--weights` can agree on a bare
/// filename.
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
    let mut options = EvalOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or_else(|| "info".into()))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            false => AdaptiveFormat::Default,
        })
        .start()?;

    options.weights = resolve_checkpoint_path(options.weights);
    let network = persistence::load(&options.weights)?;
    let opponent = opponent_policy(options.opponent);
    let mut rng = rand::rng();

    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);
    for game in 0..options.games {
        let network_seat = if options.swap_colors && game % 2 == 1 {
            Player::White
        } else {
            Player::Black
        };

        match play_one(
            &network,
            opponent.as_ref(),
            network_seat,
            options.iterations,
            options.turn_cap,
            &mut rng,
        ) {
            Some(winner) if winner == network_seat => wins += 1,
            Some(_) => losses += 1,
            None => draws += 1,
        }
    }

    let total = options.games.max(1) as f32;
    log::info!(
        "{} games: {} wins, {} losses, {} draws ({:.1}% win rate)",
        options.games,
        wins,
        losses,
        draws,
        100.0 * wins as f32 / total
    );

    Ok(())
}

//! The self-play trainer: a pool of worker threads each playing games against the
//! curriculum's current opponent, feeding finished trajectories to a single updater
//! loop that owns every write to the learner's weights (§4.H).
//!
//! Workers hold the learner behind `Arc<RwLock<Network>>`, taking the read lock only
//! for the instant it takes to pick one move; the updater takes the write lock once
//! per finished game. The self-play opponent is a second, independently-swappable
//! handle, `Arc<RwLock<Arc<Network>>>`: the outer lock only ever guards the pointer
//! swap, so a worker already mid-game keeps playing against the snapshot it cloned at
//! the game's start even after the updater publishes a fresher one.
//!
//! Finished games travel from workers to the updater over a bounded
//! `std::sync::mpsc` channel. Workers hold their own `Sender` clone and drop it when
//! their share of the game count is exhausted; once every worker has dropped its
//! sender, the updater's receiving `for` loop ends on its own; no separate
//! "done" flag is threaded through.

pub mod rolling;
pub mod trajectory;
pub mod updater;
pub mod worker;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::sync_channel;
use std::sync::{Arc, RwLock};
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::consts::Player;
use crate::errors::ContrastError;
use crate::eval::network::Network;
use crate::eval::persistence;
use crate::train::rolling::RollingWindow;
use crate::train::trajectory::Trajectory;
use crate::train::updater::apply_trajectory;
use crate::train::worker::{OpponentHandle, play_game};

/// The square term's coefficient in the inverse-square learning-rate schedule:
/// `lr = lr_min + (lr_max - lr_min) / (1 + K * progress^2)`, `progress` in `0..=1`.
const LR_DECAY_K: f32 = 19.0;

/// Which opponent the learner trains against, and the curriculum's promotion order
/// (§4.H). Picking `SelfPlay` starts the run at `Greedy` and lets the updater promote
/// automatically; picking `Greedy` or `RuleBased` pins training to that one stage for
/// the whole run, useful for ablation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opponent {
    Greedy,
    RuleBased,
    SelfPlay,
}

impl Opponent {
    fn next_stage(self) -> Opponent {
        match self {
            Opponent::Greedy => Opponent::RuleBased,
            Opponent::RuleBased => Opponent::SelfPlay,
            Opponent::SelfPlay => Opponent::SelfPlay,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrainerConfig {
    pub games: u32,
    pub turn_cap: u32,
    pub lr_max: f32,
    pub lr_min: f32,
    pub epsilon: f32,
    pub opponent: Opponent,
    pub threads: usize,
    pub save_interval: u32,
    pub output: PathBuf,
    pub load: Option<PathBuf>,
    pub role_swap_every: u32,
    pub promotion_win_rate: f32,
    pub rolling_window: usize,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Trainer {
        Trainer { config }
    }

    /// Runs the full training loop to completion and returns the learned network.
    /// The output path also holds the most recent checkpoint on disk once this
    /// returns, taken every `save_interval` games plus once more at the end.
    pub fn run(&self) -> Result<Network, ContrastError> {
        let config = &self.config;

        let initial_network = match &config.load {
            Some(path) => persistence::load(path)?,
            None => Network::new(),
        };
        let learner = Arc::new(RwLock::new(initial_network));

        let starting_stage = match config.opponent {
            Opponent::SelfPlay => Opponent::Greedy,
            other => other,
        };
        let stage = Arc::new(RwLock::new(starting_stage));
        let curriculum_enabled = config.opponent == Opponent::SelfPlay;

        let seed_snapshot = learner.read().expect("learner lock poisoned").clone();
        let opponent_snapshot = Arc::new(RwLock::new(Arc::new(seed_snapshot)));

        let remaining = Arc::new(AtomicU32::new(config.games));
        let (sender, receiver) = sync_channel::<(Trajectory, Player, bool)>(config.threads.max(1) * 2);

        let mut handles = Vec::with_capacity(config.threads);
        for _ in 0..config.threads.max(1) {
            let learner = Arc::clone(&learner);
            let stage = Arc::clone(&stage);
            let opponent_snapshot = Arc::clone(&opponent_snapshot);
            let remaining = Arc::clone(&remaining);
            let sender = sender.clone();
            let turn_cap = config.turn_cap;
            let epsilon = config.epsilon;
            let role_swap_every = config.role_swap_every.max(1);
            let total_games = config.games;

            handles.push(thread::spawn(move || {
                let mut rng = StdRng::from_os_rng();
                loop {
                    let previously_remaining = remaining.fetch_update(
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                        |v| if v > 0 { Some(v - 1) } else { None },
                    );
                    let previously_remaining = match previously_remaining {
                        Ok(prev) => prev,
                        Err(_) => break,
                    };
                    let game_index = total_games - previously_remaining;

                    let current_stage = *stage.read().expect("stage lock poisoned");
                    let train_all = current_stage == Opponent::SelfPlay;
                    let handle = match current_stage {
                        Opponent::Greedy => OpponentHandle::Greedy,
                        Opponent::RuleBased => OpponentHandle::RuleBased,
                        Opponent::SelfPlay => OpponentHandle::SelfPlay(
                            opponent_snapshot.read().expect("snapshot lock poisoned").clone(),
                        ),
                    };

                    let learner_seat = if (game_index / role_swap_every) % 2 == 0 {
                        Player::Black
                    } else {
                        Player::White
                    };

                    // Starting player alternates by game parity, independent of which
                    // colour the learner occupies: the 1st, 3rd, 5th... game (odd,
                    // 1-indexed) opens with White to move, the 2nd, 4th... with Black.
                    let game_number = game_index + 1;
                    let starting_player = if game_number % 2 == 1 {
                        Player::White
                    } else {
                        Player::Black
                    };

                    let trajectory = play_game(
                        &learner,
                        &handle,
                        learner_seat,
                        starting_player,
                        epsilon,
                        turn_cap,
                        &mut rng,
                    );

                    if sender.send((trajectory, learner_seat, train_all)).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(sender);

        self.run_updater(&learner, &stage, &opponent_snapshot, curriculum_enabled, receiver)?;

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        let final_network = learner.read().expect("learner lock poisoned").clone();
        persistence::save(&final_network, &config.output)?;
        Ok(final_network)
    }

    fn run_updater(
        &self,
        learner: &RwLock<Network>,
        stage: &RwLock<Opponent>,
        opponent_snapshot: &RwLock<Arc<Network>>,
        curriculum_enabled: bool,
        receiver: std::sync::mpsc::Receiver<(Trajectory, Player, bool)>,
    ) -> Result<(), ContrastError> {
        let config = &self.config;
        let mut rolling = RollingWindow::new(config.rolling_window);
        let mut games_done: u32 = 0;

        for (trajectory, learner_seat, train_all) in receiver.iter() {
            games_done += 1;
            let progress = games_done as f32 / config.games.max(1) as f32;
            let lr = config.lr_min
                + (config.lr_max - config.lr_min) / (1.0 + LR_DECAY_K * progress * progress);

            {
                let mut guard = learner.write().expect("learner lock poisoned");
                apply_trajectory(&mut guard, &trajectory, lr, learner_seat, train_all);
            }

            rolling.record(trajectory.winner == Some(learner_seat));

            if curriculum_enabled {
                let mut stage_guard = stage.write().expect("stage lock poisoned");
                if *stage_guard != Opponent::SelfPlay
                    && rolling.is_full()
                    && rolling.win_rate() >= config.promotion_win_rate
                {
                    *stage_guard = stage_guard.next_stage();
                    log::info!("curriculum promoted to {:?} after {} games", *stage_guard, games_done);
                    rolling.clear();
                    if *stage_guard == Opponent::SelfPlay {
                        let snap = learner.read().expect("learner lock poisoned").clone();
                        *opponent_snapshot.write().expect("snapshot lock poisoned") = Arc::new(snap);
                    }
                }
            }

            if config.save_interval > 0 && games_done % config.save_interval == 0 {
                let guard = learner.read().expect("learner lock poisoned");
                persistence::save(&guard, &config.output)?;
                log::info!(
                    "checkpoint at {} games, rolling win rate {:.1}% over {} games",
                    games_done,
                    rolling.win_rate() * 100.0,
                    rolling.len()
                );
                if curriculum_enabled && *stage.read().expect("stage lock poisoned") == Opponent::SelfPlay {
                    let snap = guard.clone();
                    *opponent_snapshot.write().expect("snapshot lock poisoned") = Arc::new(snap);
                    log::debug!("refreshed self-play opponent snapshot at {} games", games_done);
                }
            }
        }

        Ok(())
    }
}

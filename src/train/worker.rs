//! One self-play game between the learner and whichever opponent the curriculum
//! currently assigns, run by a worker thread with no write access to the learner's
//! weights (§4.H).

use std::sync::{Arc, RwLock};

use rand::RngCore;

use crate::core::consts::Player;
use crate::core::rules::{apply_move, is_win, legal_moves};
use crate::core::state::GameState;
use crate::eval::network::Network;
use crate::policy::{EpsilonGreedyPolicy, GreedyPolicy, Policy, RuleBasedPolicy};
use crate::train::trajectory::{Step, Trajectory};

/// The opponent a worker plays a single game against. `SelfPlay` carries a frozen
/// snapshot rather than a live reference to the learner, so a game in progress is
/// unaffected by the updater promoting or swapping the snapshot mid-game.
pub enum OpponentHandle {
    Greedy,
    RuleBased,
    SelfPlay(Arc<Network>),
}

impl OpponentHandle {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<crate::core::rules::Move> {
        match self {
            OpponentHandle::Greedy => GreedyPolicy.select_move(state, rng),
            OpponentHandle::RuleBased => RuleBasedPolicy.select_move(state, rng),
            OpponentHandle::SelfPlay(snapshot) => {
                EpsilonGreedyPolicy::new(snapshot, 0.0).select_move(state, rng)
            }
        }
    }
}

/// Plays one game. `learner` is locked read-only for exactly as long as it takes to
/// pick one move, not for the whole game, so the updater can take its write lock
/// between any two of the learner's moves. `learner_seat` lets the trainer alternate
/// which colour the learner plays across games (role-swap, §4.H); `starting_player`
/// is the independent mechanism by which the side to move first alternates by game
/// parity (§4.H step 3) — the two are unrelated, since a game can equally well open
/// with the learner to move or with its opponent to move.
pub fn play_game(
    learner: &RwLock<Network>,
    opponent: &OpponentHandle,
    learner_seat: Player,
    starting_player: Player,
    epsilon: f32,
    turn_cap: u32,
    rng: &mut dyn RngCore,
) -> Trajectory {
    let mut state = GameState::starting(starting_player);
    let mut steps = Vec::new();

    for _ in 0..turn_cap {
        if is_win(&state, Player::Black) {
            return Trajectory {
                steps,
                winner: Some(Player::Black),
            };
        }
        if is_win(&state, Player::White) {
            return Trajectory {
                steps,
                winner: Some(Player::White),
            };
        }
        if legal_moves(&state).is_empty() {
            return Trajectory {
                steps,
                winner: Some(state.to_move.opponent()),
            };
        }

        steps.push(Step { state });

        let mv = if state.to_move == learner_seat {
            let guard = learner.read().expect("learner lock poisoned");
            EpsilonGreedyPolicy::new(&guard, epsilon).select_move(&state, rng)
        } else {
            opponent.select_move(&state, rng)
        }
        .expect("legal_moves was checked non-empty above");

        state = apply_move(&state, &mv);
    }

    Trajectory { steps, winner: None }
}

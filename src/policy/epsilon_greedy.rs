//! The self-play driver's own move policy: with probability `epsilon` explore
//! uniformly at random, otherwise play the legal move whose resulting position the
//! wrapped network values most highly for the mover, ties broken uniformly at random
//! (§4.F, §4.H) — the same tie-breaking rule `GreedyPolicy`/`RuleBasedPolicy`/
//! `RandomPolicy` already honour.

use rand::{Rng, RngCore};

use crate::core::rules::{Move, apply_move, legal_moves};
use crate::core::state::GameState;
use crate::eval::network::Network;
use crate::policy::Policy;

pub struct EpsilonGreedyPolicy<'a> {
    network: &'a Network,
    epsilon: f32,
}

impl<'a> EpsilonGreedyPolicy<'a> {
    pub fn new(network: &'a Network, epsilon: f32) -> EpsilonGreedyPolicy<'a> {
        EpsilonGreedyPolicy { network, epsilon }
    }
}

impl Policy for EpsilonGreedyPolicy<'_> {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }

        if rng.random_range(0.0f32..1.0) < self.epsilon {
            let i = rng.random_range(0..moves.len());
            return Some(moves[i]);
        }

        // `Network::evaluate` values a state from its own `to_move`'s perspective;
        // `apply_move` flips `to_move` to the opponent, so the mover's value of the
        // resulting position is the negation of what the network reports for it.
        let valued: Vec<(Move, f32)> = moves
            .into_iter()
            .map(|mv| {
                let next = apply_move(state, &mv);
                let mover_value = -self.network.evaluate(&next);
                (mv, mover_value)
            })
            .collect();

        let best_value = valued
            .iter()
            .map(|&(_, v)| v)
            .fold(f32::NEG_INFINITY, f32::max);
        let best: Vec<Move> = valued
            .into_iter()
            .filter(|&(_, v)| v == best_value)
            .map(|(mv, _)| mv)
            .collect();

        let i = rng.random_range(0..best.len());
        Some(best[i])
    }
}

//! The weakest opponent: picks uniformly among the legal moves (§4.F, curriculum
//! floor).

use rand::{Rng, RngCore};

use crate::core::rules::{Move, legal_moves};
use crate::core::state::GameState;
use crate::policy::Policy;

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }
        let i = rng.random_range(0..moves.len());
        Some(moves[i])
    }
}

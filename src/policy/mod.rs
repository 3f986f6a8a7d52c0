//! Move-selection policies used by self-play opponents and by MCTS's evaluator-backed
//! search (§4.F).
//!
//! `Policy` takes `&mut dyn RngCore` rather than a generic `impl Rng` so trainer code
//! can hold a `Box<dyn Policy>` and swap opponents (greedy, rule-based, self-play
//! snapshot) without monomorphising over the RNG type, mirroring how the teacher's
//! agent trait takes its board by trait object rather than by generic parameter.

pub mod epsilon_greedy;
pub mod greedy;
pub mod random;
pub mod rulebased;

use rand::RngCore;

use crate::core::rules::Move;
use crate::core::state::GameState;

/// Selects one legal move for the side to move in `state`. Returns `None` only when
/// `state` has no legal moves (a terminal, lost position for the side to move).
pub trait Policy {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<Move>;
}

pub mod prelude {
    pub use super::Policy;
    pub use super::epsilon_greedy::EpsilonGreedyPolicy;
    pub use super::greedy::GreedyPolicy;
    pub use super::random::RandomPolicy;
    pub use super::rulebased::RuleBasedPolicy;
}

pub use prelude::*;

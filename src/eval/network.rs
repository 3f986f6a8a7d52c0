//! The N-tuple linear evaluator: index encoding, weight storage, evaluation, and the
//! TD(0) update (§4.E).

use std::collections::HashMap;

use crate::core::consts::Player;
use crate::core::state::GameState;
use crate::eval::patterns::{NUM_PATTERNS, PATTERNS};

/// A learned weight table over the 12-pattern catalogue.
///
/// Each pattern's state space (`9^9 * 64`, ~24.8 billion states) is far too large to
/// store densely; §4.E's Open Questions explicitly license a hash in its place, so
/// weights live in a `HashMap<u64, f32>` per pattern. A key absent from the map reads
/// as the shared initial prior and is only materialized on first write, so evaluating
/// a freshly-constructed network allocates nothing beyond the lookup itself.
#[derive(Clone, Debug)]
pub struct Network {
    weights: Vec<HashMap<u64, f32>>,
}

impl Network {
    pub fn new() -> Network {
        Network {
            weights: (0..NUM_PATTERNS).map(|_| HashMap::new()).collect(),
        }
    }

    pub fn num_patterns(&self) -> usize {
        NUM_PATTERNS
    }

    /// The shared prior every unweighted state reads as: `0.5 / num_patterns`,
    /// giving a small positive first-mover-advantage bias.
    pub fn initial_value(&self) -> f32 {
        0.5 / NUM_PATTERNS as f32
    }

    fn weight(&self, pattern: usize, idx: u64) -> f32 {
        *self.weights[pattern].get(&idx).unwrap_or(&self.initial_value())
    }

    /// Every learned `(index, weight)` pair for one pattern, for serialisation.
    /// Indices never written by `td_update` are not materialized and so are absent
    /// here; they still read back as `initial_value` on load.
    pub fn entries(&self, pattern: usize) -> Vec<(u64, f32)> {
        self.weights[pattern]
            .iter()
            .map(|(&idx, &w)| (idx, w))
            .collect()
    }

    /// Sets a single weight directly, bypassing the TD update rule. Used only to
    /// reconstruct a network from a serialized checkpoint.
    pub fn set_raw(&mut self, pattern: usize, idx: u64, weight: f32) {
        self.weights[pattern].insert(idx, weight);
    }

    /// The final index for one pattern against an already-canonicalised state:
    /// `idx = fold(cell codes) * 64 + tile_index`.
    pub fn to_index(pattern: usize, canonical_state: &GameState) -> u64 {
        let mut idx: u64 = 0;
        for &cell_index in &PATTERNS[pattern] {
            let code = canonical_state.board.0[cell_index].code() as u64;
            idx = idx * 9 + code;
        }
        let black_side = canonical_state.inventory_black.side_index() as u64;
        let white_side = canonical_state.inventory_white.side_index() as u64;
        let tile_index = 8 * black_side + white_side;
        idx * 64 + tile_index
    }

    fn raw_sum(&self, canonical_state: &GameState) -> f32 {
        (0..NUM_PATTERNS)
            .map(|p| self.weight(p, Network::to_index(p, canonical_state)))
            .sum()
    }

    /// The evaluator's estimate of `state`, from `state.to_move`'s perspective.
    /// Weights are learned in the Black-to-move frame, so White's view negates the
    /// raw sum.
    pub fn evaluate(&self, state: &GameState) -> f32 {
        let canonical = state.canonicalised();
        let raw = self.raw_sum(&canonical);
        match state.to_move {
            Player::White => -raw,
            _ => raw,
        }
    }

    /// One TD(0) step toward `target` at the given learning rate. `lr` is divided by
    /// `NUM_PATTERNS` so the effective per-state step size does not depend on the
    /// catalogue's size.
    pub fn td_update(&mut self, state: &GameState, target: f32, lr: f32) {
        let canonical = state.canonicalised();
        let raw = self.raw_sum(&canonical);
        let current = match state.to_move {
            Player::White => -raw,
            _ => raw,
        };
        let mut error = target - current;
        if state.to_move == Player::White {
            error = -error;
        }
        let step = lr / NUM_PATTERNS as f32;
        let initial = self.initial_value();
        for p in 0..NUM_PATTERNS {
            let idx = Network::to_index(p, &canonical);
            let entry = self.weights[p].entry(idx).or_insert(initial);
            *entry += step * error;
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_network_evaluates_to_the_uniform_prior() {
        let net = Network::new();
        let s = GameState::initial();
        assert!((net.evaluate(&s) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn td_update_moves_evaluate_toward_the_target() {
        let mut net = Network::new();
        let s = GameState::initial();
        let before = net.evaluate(&s);
        net.td_update(&s, 1.0, 0.1);
        let after_up = net.evaluate(&s);
        assert!(after_up > before);

        let mut net2 = Network::new();
        net2.td_update(&s, -1.0, 0.1);
        let after_down = net2.evaluate(&s);
        assert!(after_down < before);
    }

    #[test]
    fn evaluate_is_antisymmetric_under_a_to_move_flip() {
        let net = Network::new();
        let mut s = GameState::initial();
        s.to_move = Player::Black;
        let black_view = net.evaluate(&s);
        s.to_move = Player::White;
        let white_view = net.evaluate(&s);
        assert!((black_view + white_view).abs() < 1e-6);
    }

    #[test]
    fn identical_patterns_under_mirror_give_identical_evaluation() {
        use crate::core::cell::Cell;
        use crate::core::consts::TileType;
        use crate::core::coord::Coord;

        let mut a = GameState::initial();
        a.board.set_cell(Coord::new(1, 2), Cell::new(crate::core::consts::Player::None, TileType::Black));
        let mut b = GameState::initial();
        b.board.set_cell(Coord::new(3, 2), Cell::new(crate::core::consts::Player::None, TileType::Black));

        let net = Network::new();
        assert_eq!(net.evaluate(&a), net.evaluate(&b));
    }
}

//! Monte Carlo tree search over an arena of indexed nodes, using the N-tuple
//! evaluator as the leaf value in place of a random rollout (§4.G).
//!
//! Nodes live in a flat `Vec<Node>` addressed by index rather than `Rc<RefCell<_>>`
//! parent/child pointers: every node after the root is only ever touched through its
//! parent during backpropagation, so there is no aliasing to manage and no reference
//! counting to pay for. This is the same arena shape the teacher's transposition
//! table uses for its own node storage.

use std::time::{Duration, Instant};

use rand::{Rng, RngCore};

use crate::core::rules::{self, Move, apply_move, legal_moves};
use crate::core::state::GameState;
use crate::eval::network::Network;

const EXPLORATION: f32 = std::f32::consts::SQRT_2;

/// A node's state is terminal, from its own `to_move`'s perspective, either because
/// the player who just moved reached their goal rank (the side to move has lost even
/// though it may still have other pieces to shuffle) or because the side to move has
/// no legal move at all. Both read as -1 for `to_move`; there is no in-tree draw,
/// since the 500-move turn cap is a training-loop concern (§4.H), not a search one.
fn terminal_value(state: &GameState) -> Option<f32> {
    if rules::is_win(state, state.to_move.opponent()) || rules::is_loss(state, state.to_move) {
        Some(-1.0)
    } else {
        None
    }
}

struct Node {
    state: GameState,
    parent: Option<usize>,
    move_from_parent: Option<Move>,
    children: Vec<usize>,
    untried: Vec<Move>,
    terminal: Option<f32>,
    visits: u32,
    /// Accumulated value from this node's own `state.to_move`'s perspective.
    value_sum: f32,
}

impl Node {
    fn new(state: GameState, parent: Option<usize>, move_from_parent: Option<Move>) -> Node {
        let terminal = terminal_value(&state);
        Node {
            untried: if terminal.is_some() { Vec::new() } else { legal_moves(&state) },
            state,
            parent,
            move_from_parent,
            children: Vec::new(),
            terminal,
            visits: 0,
            value_sum: 0.0,
        }
    }

    fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f32
        }
    }
}

/// One search tree rooted at a fixed position. Re-used across iterations within a
/// single move decision, then discarded; the trainer builds a fresh `Mcts` per move
/// rather than retaining a tree across a game (§4.G, §4.H).
pub struct Mcts {
    arena: Vec<Node>,
}

impl Mcts {
    pub fn new(root_state: GameState) -> Mcts {
        Mcts {
            arena: vec![Node::new(root_state, None, None)],
        }
    }

    /// Runs exactly `iterations` select/expand/evaluate/backpropagate passes.
    pub fn run_iterations(&mut self, iterations: u32, network: &Network, rng: &mut dyn RngCore) {
        for _ in 0..iterations {
            self.one_iteration(network, rng);
        }
    }

    /// Runs passes until `budget` has elapsed, checking the clock between iterations
    /// rather than mid-iteration.
    pub fn run_for_duration(&mut self, budget: Duration, network: &Network, rng: &mut dyn RngCore) {
        let start = Instant::now();
        while start.elapsed() < budget {
            self.one_iteration(network, rng);
        }
    }

    fn one_iteration(&mut self, network: &Network, rng: &mut dyn RngCore) {
        let leaf = self.select(0);
        let (evaluated, value) = self.expand_and_evaluate(leaf, network, rng);
        self.backpropagate(evaluated, value);
    }

    /// Walks down the tree by UCB1 from `from`, stopping at the first node that still
    /// has an untried move or that has no legal moves at all.
    fn select(&self, from: usize) -> usize {
        let mut current = from;
        loop {
            let node = &self.arena[current];
            if !node.untried.is_empty() || node.children.is_empty() {
                return current;
            }
            current = self.best_child_by_ucb1(current);
        }
    }

    fn best_child_by_ucb1(&self, parent: usize) -> usize {
        let parent_visits = self.arena[parent].visits as f32;
        self.arena[parent]
            .children
            .iter()
            .copied()
            .max_by(|&a, &b| {
                self.ucb1(a, parent_visits)
                    .partial_cmp(&self.ucb1(b, parent_visits))
                    .expect("ucb1 never returns NaN")
            })
            .expect("best_child_by_ucb1 called on a node with no children")
    }

    fn ucb1(&self, child: usize, parent_visits: f32) -> f32 {
        let node = &self.arena[child];
        if node.visits == 0 {
            return f32::INFINITY;
        }
        let exploitation = node.mean_value();
        let exploration = EXPLORATION * (parent_visits.ln() / node.visits as f32).sqrt();
        exploitation + exploration
    }

    /// Expands one untried move from `node_index` (if any) into a fresh child, then
    /// evaluates that child's position with `network`. Returns the index actually
    /// evaluated (the new child, or `node_index` itself if it was already terminal)
    /// along with the value from that node's own `to_move`'s perspective.
    fn expand_and_evaluate(
        &mut self,
        node_index: usize,
        network: &Network,
        rng: &mut dyn RngCore,
    ) -> (usize, f32) {
        if let Some(value) = self.arena[node_index].terminal {
            return (node_index, value);
        }

        let untried = &mut self.arena[node_index].untried;
        let pick = rng.random_range(0..untried.len());
        let mv = untried.swap_remove(pick);

        let child_state = apply_move(&self.arena[node_index].state, &mv);
        let child_index = self.arena.len();
        let child_node = Node::new(child_state, Some(node_index), Some(mv));
        let value = child_node.terminal.unwrap_or_else(|| network.evaluate(&child_state));
        self.arena.push(child_node);
        self.arena[node_index].children.push(child_index);

        (child_index, value)
    }

    /// Backs `value` (from `leaf`'s own perspective) up to the root, negating at
    /// every step: a node one ply above evaluates the position from its opponent's
    /// point of view, exactly the negamax framing used throughout the rules engine.
    fn backpropagate(&mut self, leaf: usize, value: f32) {
        let mut current = Some(leaf);
        let mut signed_value = value;
        while let Some(idx) = current {
            let node = &mut self.arena[idx];
            node.visits += 1;
            node.value_sum += signed_value;
            signed_value = -signed_value;
            current = node.parent;
        }
    }

    /// The most-visited child of the root, i.e. the move recommendation. `None` only
    /// when the root has no legal moves.
    pub fn best_move(&self) -> Option<Move> {
        self.arena[0]
            .children
            .iter()
            .max_by_key(|&&child| self.arena[child].visits)
            .and_then(|&child| self.arena[child].move_from_parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommends_a_legal_move_from_the_initial_position() {
        let network = Network::new();
        let mut rng = rand::rng();
        let mut mcts = Mcts::new(GameState::initial());
        mcts.run_iterations(200, &network, &mut rng);
        let mv = mcts.best_move().unwrap();
        assert!(legal_moves(&GameState::initial()).contains(&mv));
    }

    #[test]
    fn a_winning_move_is_treated_as_terminal_even_if_the_loser_has_other_moves() {
        use crate::core::board::Board;
        use crate::core::cell::Cell;
        use crate::core::consts::{NUM_CELLS, Player, TileType};
        use crate::core::coord::Coord;
        use crate::core::inventory::TileInventory;

        // Black one step from its goal rank (y=4), with a spare White piece parked
        // elsewhere so White still has legal moves once Black wins.
        let mut cells = [Cell::EMPTY; NUM_CELLS];
        cells[Coord::new(2, 3).to_index()] = Cell::new(Player::Black, TileType::None);
        cells[Coord::new(0, 0).to_index()] = Cell::new(Player::White, TileType::None);
        let state = GameState {
            board: Board(cells),
            to_move: Player::Black,
            inventory_black: TileInventory::INITIAL,
            inventory_white: TileInventory::INITIAL,
        };

        let winning_move = crate::core::rules::legal_moves(&state)
            .into_iter()
            .find(|mv| mv.to == Coord::new(2, 4) && mv.placement.is_none())
            .expect("a plain step onto the goal rank must be legal here");
        let after_win = apply_move(&state, &winning_move);

        assert!(rules::is_win(&after_win, Player::Black));
        assert!(!legal_moves(&after_win).is_empty(), "White can still move elsewhere");
        assert_eq!(terminal_value(&after_win), Some(-1.0));
    }

    #[test]
    fn more_iterations_never_shrink_the_root_visit_count() {
        let network = Network::new();
        let mut rng = rand::rng();
        let mut mcts = Mcts::new(GameState::initial());
        mcts.run_iterations(10, &network, &mut rng);
        let after_ten = mcts.arena[0].visits;
        mcts.run_iterations(10, &network, &mut rng);
        let after_twenty = mcts.arena[0].visits;
        assert!(after_twenty > after_ten);
    }
}

//! A priority-ladder opponent, one rung above `GreedyPolicy` in the curriculum (§4.F,
//! §4.H): take an immediate win if one exists, else block an immediate threat against
//! the mover, else fall back to forward progress.

use rand::{Rng, RngCore};

use crate::core::consts::Player;
use crate::core::rules::{self, Move, apply_move, legal_moves};
use crate::core::state::GameState;
use crate::policy::Policy;
use crate::policy::greedy::GreedyPolicy;

#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedPolicy;

/// True iff `state.to_move` has some legal move that wins immediately.
fn threatens_immediate_win(state: &GameState) -> bool {
    let mover = state.to_move;
    legal_moves(state)
        .iter()
        .any(|mv| rules::is_win(&apply_move(state, mv), mover))
}

impl Policy for RuleBasedPolicy {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<Move> {
        let mover = state.to_move;
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }

        let winning: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| rules::is_win(&apply_move(state, mv), mover))
            .collect();
        if !winning.is_empty() {
            let i = rng.random_range(0..winning.len());
            return Some(winning[i]);
        }

        let blocking: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| !threatens_immediate_win(&apply_move(state, mv)))
            .collect();
        if !blocking.is_empty() {
            return restrict_and_fall_back_to_greedy(state, &blocking, rng);
        }

        GreedyPolicy.select_move(state, rng)
    }
}

/// Runs `GreedyPolicy`'s strictly-reduce > non-retreating > uniform ladder over a
/// restricted move list, since `GreedyPolicy` itself always consults the full
/// legal-move list.
fn restrict_and_fall_back_to_greedy(
    state: &GameState,
    candidates: &[Move],
    rng: &mut dyn RngCore,
) -> Option<Move> {
    let mover = state.to_move;
    let distance = |y: u8| (mover.goal_rank() as i32 - y as i32).abs();
    let delta = |mv: &Move| distance(mv.to.y) - distance(mv.from.y);

    let reducing: Vec<Move> = candidates.iter().copied().filter(|mv| delta(mv) < 0).collect();
    let pool = if !reducing.is_empty() {
        reducing
    } else {
        let non_retreating: Vec<Move> =
            candidates.iter().copied().filter(|mv| delta(mv) <= 0).collect();
        if !non_retreating.is_empty() { non_retreating } else { candidates.to_vec() }
    };

    let i = rng.random_range(0..pool.len());
    Some(pool[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::cell::Cell;
    use crate::core::consts::{NUM_CELLS, TileType};
    use crate::core::coord::Coord;
    use crate::core::inventory::TileInventory;

    fn empty_state(to_move: Player) -> GameState {
        GameState {
            board: Board([Cell::EMPTY; NUM_CELLS]),
            to_move,
            inventory_black: TileInventory::INITIAL,
            inventory_white: TileInventory::INITIAL,
        }
    }

    #[test]
    fn takes_an_immediate_win_when_one_is_available() {
        let mut s = empty_state(Player::Black);
        // One step from the goal rank (y = HEIGHT - 1 = 4).
        s.board
            .set_cell(Coord::new(2, 3), Cell::new(Player::Black, TileType::None));

        let policy = RuleBasedPolicy;
        let mut rng = rand::rng();
        let mv = policy.select_move(&s, &mut rng).unwrap();
        let next = apply_move(&s, &mv);
        assert!(rules::is_win(&next, Player::Black));
    }
}

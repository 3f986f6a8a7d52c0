//! A simple forward-progress heuristic (§4.F): prefer moves that strictly reduce the
//! moved piece's own distance to its goal rank; if none do, prefer moves that do not
//! retreat it; otherwise fall back to uniform over the whole legal-move list. Each
//! move is judged against its own origin's distance, not against the other
//! candidates' destinations, so a piece already standing on the goal rank cannot
//! out-rank a different piece's genuine advance.

use rand::{Rng, RngCore};

use crate::core::consts::Player;
use crate::core::rules::{Move, legal_moves};
use crate::core::state::GameState;
use crate::policy::Policy;

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

fn distance_to_goal(player: Player, y: u8) -> i32 {
    let goal = player.goal_rank() as i32;
    (goal - y as i32).abs()
}

/// `< 0` if `mv` strictly reduces the mover's distance to its goal rank, `0` if
/// unchanged, `> 0` if it retreats.
fn delta(mover: Player, mv: &Move) -> i32 {
    distance_to_goal(mover, mv.to.y) - distance_to_goal(mover, mv.from.y)
}

impl Policy for GreedyPolicy {
    fn select_move(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = legal_moves(state);
        if moves.is_empty() {
            return None;
        }

        let mover = state.to_move;
        let reducing: Vec<Move> = moves.iter().copied().filter(|mv| delta(mover, mv) < 0).collect();
        let candidates = if !reducing.is_empty() {
            reducing
        } else {
            let non_retreating: Vec<Move> =
                moves.iter().copied().filter(|mv| delta(mover, mv) <= 0).collect();
            if !non_retreating.is_empty() { non_retreating } else { moves }
        };

        let i = rng.random_range(0..candidates.len());
        Some(candidates[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_a_move_that_strictly_reduces_distance_over_one_that_retreats() {
        use crate::core::board::Board;
        use crate::core::cell::Cell;
        use crate::core::consts::{NUM_CELLS, TileType};
        use crate::core::coord::Coord;
        use crate::core::inventory::TileInventory;

        // Black piece at (2,2): stepping to (2,3) reduces distance to the goal rank
        // (y=4); stepping to (2,1) retreats. Both are legal orthogonal base moves.
        let mut cells = [Cell::EMPTY; NUM_CELLS];
        cells[Coord::new(2, 2).to_index()] = Cell::new(Player::Black, TileType::None);
        let state = GameState {
            board: Board(cells),
            to_move: Player::Black,
            inventory_black: TileInventory::INITIAL,
            inventory_white: TileInventory::INITIAL,
        };

        let policy = GreedyPolicy;
        let mut rng = rand::rng();
        for _ in 0..20 {
            let mv = policy.select_move(&state, &mut rng).unwrap();
            assert_eq!(mv.to, Coord::new(2, 3));
        }
    }

    #[test]
    fn falls_back_to_uniform_when_every_move_retreats() {
        use crate::core::board::Board;
        use crate::core::cell::Cell;
        use crate::core::consts::{NUM_CELLS, TileType};
        use crate::core::coord::Coord;
        use crate::core::inventory::TileInventory;

        // Black piece already on its own goal rank (y=4): every orthogonal step is a
        // retreat, so the policy must still return some legal move.
        let mut cells = [Cell::EMPTY; NUM_CELLS];
        cells[Coord::new(2, 4).to_index()] = Cell::new(Player::Black, TileType::None);
        let state = GameState {
            board: Board(cells),
            to_move: Player::Black,
            inventory_black: TileInventory::INITIAL,
            inventory_white: TileInventory::INITIAL,
        };

        let policy = GreedyPolicy;
        let mut rng = rand::rng();
        let mv = policy.select_move(&state, &mut rng).unwrap();
        assert!(legal_moves(&state).contains(&mv));
    }

    #[test]
    fn always_returns_a_legal_move_from_the_initial_position() {
        let policy = GreedyPolicy;
        let state = GameState::initial();
        let mut rng = rand::rng();
        let mv = policy.select_move(&state, &mut rng).unwrap();
        assert!(legal_moves(&state).contains(&mv));
    }
}

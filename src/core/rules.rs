//! Legal-move enumeration, move application, and terminal tests (§4.C).

use itertools::Itertools;

use crate::core::cell::Cell;
use crate::core::consts::{HEIGHT, NUM_CELLS, Player, TileType, WIDTH};
use crate::core::coord::Coord;
use crate::core::movetable::move_table;
use crate::core::state::GameState;

/// A tile placement accompanying a base move: a target cell and the tile colour
/// dropped there. Independent of the motion itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub at: Coord,
    pub tile: TileType,
}

/// A full move: a motion from `from` to `to`, plus an optional tile placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub placement: Option<Placement>,
}

impl Move {
    pub fn base(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            placement: None,
        }
    }
}

/// The base moves (no placement) reachable by the ray-walk rule from one origin,
/// for the side currently occupying it.
fn base_moves_from(state: &GameState, origin: Coord) -> Vec<Coord> {
    let own = state.to_move;
    let tile = state.board.cell(origin).tile;
    let mut destinations = Vec::new();

    for ray in move_table().rays_for(tile, origin.to_index()) {
        let mut encountered_friend = false;
        for (step_index, &target) in ray.iter().enumerate() {
            let target_coord = Coord::from_index(target);
            let occupant = state.board.cell(target_coord).occupant;

            if occupant == Player::None {
                // By construction this is only reached at step 0, or after at least
                // one friendly piece has been crossed; both are legal landings.
                if !encountered_friend && step_index != 0 {
                    break;
                }
                destinations.push(target_coord);
                break;
            } else if occupant == own {
                encountered_friend = true;
                continue;
            } else {
                // Opponent piece: blocks both immediate capture and further jumping.
                break;
            }
        }
    }

    destinations
}

/// All legal moves for the side to move in `state`, including every tile-placement
/// variant of every base move.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let own = state.to_move;
    let mut moves = Vec::new();

    for i in 0..NUM_CELLS {
        let origin = Coord::from_index(i);
        if state.board.cell(origin).occupant != own {
            continue;
        }

        for dest in base_moves_from(state, origin) {
            moves.push(Move::base(origin, dest));

            let inventory = state.inventory(own);
            let available_tiles: Vec<TileType> = [TileType::Black, TileType::Gray]
                .into_iter()
                .filter(|&tile| inventory.count(tile) > 0)
                .collect();

            for (at, tile) in placement_targets(state, origin, dest)
                .into_iter()
                .cartesian_product(available_tiles)
            {
                moves.push(Move {
                    from: origin,
                    to: dest,
                    placement: Some(Placement { at, tile }),
                });
            }
        }
    }

    moves
}

/// Every cell that is empty and tile-free once the motion `origin -> dest` has
/// resolved, excluding `dest` itself. The mover's vacated `origin` is eligible.
fn placement_targets(state: &GameState, origin: Coord, dest: Coord) -> Vec<Coord> {
    let mut targets = Vec::with_capacity(NUM_CELLS);
    for i in 0..NUM_CELLS {
        let coord = Coord::from_index(i);
        if coord == dest {
            continue;
        }
        let cell = state.board.cell(coord);
        if cell.tile != TileType::None {
            continue;
        }
        let occupant_after = if coord == origin {
            Player::None
        } else {
            cell.occupant
        };
        if occupant_after == Player::None {
            targets.push(coord);
        }
    }
    targets
}

/// Applies `mv` to `state`, returning the resulting state. Does not validate that
/// `mv` is legal; callers must check against `legal_moves` first (§4.C, "Failure
/// modes").
pub fn apply_move(state: &GameState, mv: &Move) -> GameState {
    let mut next = *state;
    let mover = state.to_move;

    let from_tile = next.board.cell(mv.from).tile;
    let to_tile = next.board.cell(mv.to).tile;
    next.board.set_cell(mv.from, Cell::new(Player::None, from_tile));
    next.board.set_cell(mv.to, Cell::new(mover, to_tile));

    if let Some(placement) = mv.placement {
        let occupant = next.board.cell(placement.at).occupant;
        next.board
            .set_cell(placement.at, Cell::new(occupant, placement.tile));
        next.inventory_mut(mover).decrement(placement.tile);
    }

    next.to_move = mover.opponent();
    next
}

/// True iff `p` has a piece on its own goal rank.
pub fn is_win(state: &GameState, p: Player) -> bool {
    let rank = p.goal_rank();
    (0..WIDTH).any(|x| state.board.cell(Coord::new(x as u8, rank as u8)).occupant == p)
}

/// True iff it is `p`'s turn and `p` has no legal move.
pub fn is_loss(state: &GameState, p: Player) -> bool {
    state.to_move == p && legal_moves(state).is_empty()
}

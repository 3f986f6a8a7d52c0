//! Geometry, the rules engine, symmetry, and the external-interface surface (§4.A-D,
//! §6). This is component A-D plus the session wrapper in one module tree, the way the
//! teacher groups board geometry and rules under `battle_of_lits::board`.

pub mod board;
pub mod cell;
pub mod consts;
pub mod coord;
pub mod inventory;
pub mod movetable;
pub mod notation;
pub mod rules;
pub mod session;
pub mod state;

pub mod prelude {
    pub use super::board::Board;
    pub use super::cell::Cell;
    pub use super::consts::{HEIGHT, NUM_CELLS, Player, TileType, WIDTH};
    pub use super::coord::Coord;
    pub use super::inventory::TileInventory;
    pub use super::movetable::move_table;
    pub use super::rules::{self, Move, Placement};
    pub use super::session::{Seat, Session, Status};
    pub use super::state::{GameState, STATE_ARRAY_LEN};
}

pub use prelude::*;

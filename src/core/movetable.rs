//! The precomputed per-(tile, origin) ray table (§4.B).
//!
//! Built once behind a `OnceLock`, the same idiom the teacher's `zobrist.rs` uses for
//! its own once-built static tables. The table encodes geometry only — it has no idea
//! which cells are occupied — so it never needs to be rebuilt or invalidated.

use std::sync::OnceLock;

use crate::core::consts::{NUM_CELLS, TileType};
use crate::core::coord::Coord;

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ALL_EIGHT: [(i8, i8); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

fn directions_for(tile: TileType) -> &'static [(i8, i8)] {
    match tile {
        TileType::None => &ORTHOGONAL,
        TileType::Black => &DIAGONAL,
        TileType::Gray => &ALL_EIGHT,
    }
}

/// A single ray: the ordered sequence of linear cell indices reached at step 1, 2, 3,
/// ... until the board edge, along one direction from one origin.
pub type Ray = Vec<usize>;

pub struct MoveTable {
    /// `rays[tile as usize][origin]` is the list of rays (one per direction) for that
    /// tile type sitting at that origin.
    rays: Vec<Vec<Vec<Ray>>>,
}

impl MoveTable {
    fn build() -> MoveTable {
        let mut rays = Vec::with_capacity(3);
        for tile_code in 0..3u8 {
            let tile = TileType::from(tile_code);
            let deltas = directions_for(tile);
            let mut per_origin = Vec::with_capacity(NUM_CELLS);
            for origin in 0..NUM_CELLS {
                let origin_coord = Coord::from_index(origin);
                let mut per_direction = Vec::with_capacity(deltas.len());
                for &(dx, dy) in deltas {
                    let mut ray = Vec::new();
                    let mut step = 1i8;
                    while let Some(target) = origin_coord.offset(dx * step, dy * step) {
                        ray.push(target.to_index());
                        step += 1;
                    }
                    per_direction.push(ray);
                }
                per_origin.push(per_direction);
            }
            rays.push(per_origin);
        }
        MoveTable { rays }
    }

    /// The rays for a tile type sitting at a given origin, one entry per direction,
    /// each entry ordered by increasing step distance.
    pub fn rays_for(&self, tile: TileType, origin: usize) -> &[Ray] {
        &self.rays[tile as usize][origin]
    }
}

static MOVE_TABLE: OnceLock<MoveTable> = OnceLock::new();

pub fn move_table() -> &'static MoveTable {
    MOVE_TABLE.get_or_init(MoveTable::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_ray_is_bounded_by_edge_distance() {
        let table = move_table();
        // Gray tile at the top-left corner (0,0): the diagonal ray toward (1,1)
        // direction can take at most 4 steps before leaving a 5x5 board.
        let rays = table.rays_for(TileType::Gray, Coord::new(0, 0).to_index());
        for ray in rays {
            assert!(ray.len() <= 4);
        }
    }

    #[test]
    fn none_tile_has_four_orthogonal_directions() {
        let table = move_table();
        assert_eq!(table.rays_for(TileType::None, 12).len(), 4);
    }

    #[test]
    fn black_tile_has_four_diagonal_directions() {
        let table = move_table();
        assert_eq!(table.rays_for(TileType::Black, 12).len(), 4);
    }

    #[test]
    fn gray_tile_has_eight_directions() {
        let table = move_table();
        assert_eq!(table.rays_for(TileType::Gray, 12).len(), 8);
    }

    #[test]
    fn rays_never_wrap_across_edges() {
        let table = move_table();
        for tile_code in 0..3u8 {
            let tile = TileType::from(tile_code);
            for origin in 0..NUM_CELLS {
                let origin_coord = Coord::from_index(origin);
                for ray in table.rays_for(tile, origin) {
                    let mut prev = origin_coord;
                    for &target in ray {
                        let target_coord = Coord::from_index(target);
                        let dx = (target_coord.x as i16 - prev.x as i16).abs();
                        let dy = (target_coord.y as i16 - prev.y as i16).abs();
                        assert!(dx <= 1 && dy <= 1);
                        prev = target_coord;
                    }
                }
            }
        }
    }
}

use crate::core::consts::TileType;

/// Per-player counts of placeable tiles by colour. Decremented on placement only;
/// never increased over a game's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileInventory {
    pub black: u8,
    pub gray: u8,
}

impl TileInventory {
    pub const INITIAL: TileInventory = TileInventory { black: 3, gray: 1 };

    pub fn count(&self, tile: TileType) -> u8 {
        match tile {
            TileType::Black => self.black,
            TileType::Gray => self.gray,
            TileType::None => panic!("inventory has no count for TileType::None"),
        }
    }

    pub fn decrement(&mut self, tile: TileType) {
        match tile {
            TileType::Black => self.black -= 1,
            TileType::Gray => self.gray -= 1,
            TileType::None => panic!("cannot decrement TileType::None"),
        }
    }

    /// The packed 3-bit tile index used by the N-tuple encoder: `black + 4*gray`.
    pub fn side_index(&self) -> u8 {
        self.black + 4 * self.gray
    }
}

impl Default for TileInventory {
    fn default() -> Self {
        TileInventory::INITIAL
    }
}

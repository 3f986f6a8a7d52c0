use crate::core::cell::Cell;
use crate::core::consts::{HEIGHT, NUM_CELLS, Player, TileType, WIDTH};
use crate::core::coord::Coord;

/// The 5x5 grid of cells, owned by value by its `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board(pub [Cell; NUM_CELLS]);

impl Board {
    /// The starting position: Black occupies the whole top row, White the whole
    /// bottom row, no tiles placed anywhere.
    pub fn initial() -> Board {
        let mut cells = [Cell::EMPTY; NUM_CELLS];
        for x in 0..WIDTH {
            cells[Coord::new(x as u8, 0).to_index()] = Cell::new(Player::Black, TileType::None);
            cells[Coord::new(x as u8, (HEIGHT - 1) as u8).to_index()] =
                Cell::new(Player::White, TileType::None);
        }
        Board(cells)
    }

    pub fn cell(&self, c: Coord) -> Cell {
        self.0[c.to_index()]
    }

    pub fn set_cell(&mut self, c: Coord, cell: Cell) {
        self.0[c.to_index()] = cell;
    }

    /// Horizontal mirror: `x -> W-1-x`, same row.
    pub fn flip(&self) -> Board {
        let mut out = [Cell::EMPTY; NUM_CELLS];
        for i in 0..NUM_CELLS {
            let c = Coord::from_index(i);
            let mirrored = Coord::new((WIDTH - 1 - c.x as usize) as u8, c.y);
            out[mirrored.to_index()] = self.0[i];
        }
        Board(out)
    }

    fn linearised_codes(&self) -> [u8; NUM_CELLS] {
        let mut out = [0u8; NUM_CELLS];
        for i in 0..NUM_CELLS {
            out[i] = self.0[i].code();
        }
        out
    }

    /// The lexicographically smaller of `{self, self.flip()}`, ties favouring the
    /// identity. This is the only symmetry the learner exploits.
    pub fn canonical(&self) -> Board {
        let flipped = self.flip();
        if flipped.linearised_codes() < self.linearised_codes() {
            flipped
        } else {
            *self
        }
    }

    /// Renders the board as a human-readable ASCII grid, rank 5 (top) to rank 1
    /// (bottom), files a..e left to right.
    pub fn pretty(&self) -> String {
        let mut lines = Vec::with_capacity(HEIGHT);
        for y in 0..HEIGHT {
            let mut line = String::with_capacity(WIDTH * 2);
            for x in 0..WIDTH {
                let cell = self.cell(Coord::new(x as u8, y as u8));
                let glyph = match (cell.occupant, cell.tile) {
                    (Player::None, TileType::None) => '.',
                    (Player::None, TileType::Black) => 'b',
                    (Player::None, TileType::Gray) => 'g',
                    (Player::Black, TileType::None) => 'X',
                    (Player::Black, TileType::Black) => 'x',
                    (Player::Black, TileType::Gray) => 'y',
                    (Player::White, TileType::None) => 'O',
                    (Player::White, TileType::Black) => 'o',
                    (Player::White, TileType::Gray) => 'p',
                };
                line.push(glyph);
                if x + 1 < WIDTH {
                    line.push(' ');
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

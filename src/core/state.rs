use crate::core::board::Board;
use crate::core::cell::Cell;
use crate::core::consts::{NUM_CELLS, Player};
use crate::core::inventory::TileInventory;
use crate::errors::ContrastError;

pub const STATE_ARRAY_LEN: usize = 29;

/// The single mutable entity rules act on: a board, whose turn it is, and both
/// players' remaining tile inventories.
///
/// `GameState` is `Copy` (a 25-cell board plus two small inventories plus a one-byte
/// tag): cloning it to explore a hypothetical future, as MCTS and the policies do
/// constantly, is exactly as cheap as the design notes ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub to_move: Player,
    pub inventory_black: TileInventory,
    pub inventory_white: TileInventory,
}

impl GameState {
    pub fn initial() -> GameState {
        GameState::starting(Player::Black)
    }

    /// The starting position with `to_move` set to `starting_player` instead of the
    /// default Black. The board layout itself does not depend on who moves first, so
    /// this is the same board as `initial()` with only the turn flipped; used by the
    /// trainer to alternate which side opens a self-play game (§4.H).
    pub fn starting(starting_player: Player) -> GameState {
        GameState {
            board: Board::initial(),
            to_move: starting_player,
            inventory_black: TileInventory::INITIAL,
            inventory_white: TileInventory::INITIAL,
        }
    }

    pub fn inventory(&self, player: Player) -> &TileInventory {
        match player {
            Player::Black => &self.inventory_black,
            Player::White => &self.inventory_white,
            Player::None => panic!("Player::None has no inventory"),
        }
    }

    pub fn inventory_mut(&mut self, player: Player) -> &mut TileInventory {
        match player {
            Player::Black => &mut self.inventory_black,
            Player::White => &mut self.inventory_white,
            Player::None => panic!("Player::None has no inventory"),
        }
    }

    /// Builds a canonicalised copy of this state: the board is replaced by
    /// `board.canonical()`, inventories and `to_move` are untouched (inventories are
    /// player-attached, not position-attached, so the symmetry does not move them).
    pub fn canonicalised(&self) -> GameState {
        GameState {
            board: self.board.canonical(),
            ..*self
        }
    }

    /// Encodes this state into the 29-element external array. `to_move` is not
    /// carried: it is orthogonal to the array per the external interface contract.
    pub fn encode(&self) -> [u8; STATE_ARRAY_LEN] {
        let mut out = [0u8; STATE_ARRAY_LEN];
        for i in 0..NUM_CELLS {
            out[i] = self.board.0[i].code();
        }
        out[25] = self.inventory_black.black;
        out[26] = self.inventory_black.gray;
        out[27] = self.inventory_white.black;
        out[28] = self.inventory_white.gray;
        out
    }

    /// Decodes a 29-element array into a board and both inventories. `to_move` is not
    /// recoverable from the array and must be supplied separately by the caller.
    pub fn decode(array: &[u8], to_move: Player) -> Result<GameState, ContrastError> {
        if array.len() != STATE_ARRAY_LEN {
            return Err(ContrastError::ArraySize(array.len()));
        }

        let mut cells = [Cell::EMPTY; NUM_CELLS];
        for i in 0..NUM_CELLS {
            let code = array[i];
            if code > 8 {
                return Err(ContrastError::OutOfRangeCoord(format!(
                    "cell {i} has out-of-range code {code}"
                )));
            }
            cells[i] = Cell::from_code(code);
        }

        let (bb, bg, wb, wg) = (array[25], array[26], array[27], array[28]);
        if bb > 3 || wb > 3 || bg > 1 || wg > 1 {
            return Err(ContrastError::OutOfRangeCoord(
                "inventory count out of range".to_string(),
            ));
        }

        Ok(GameState {
            board: Board(cells),
            to_move,
            inventory_black: TileInventory { black: bb, gray: bg },
            inventory_white: TileInventory { black: wb, gray: wg },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_encodes_as_the_spec_example() {
        let s = GameState::initial();
        let expected: [u8; STATE_ARRAY_LEN] = [
            3, 3, 3, 3, 3, //
            0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, //
            6, 6, 6, 6, 6, //
            3, 1, 3, 1,
        ];
        assert_eq!(s.encode(), expected);
    }

    #[test]
    fn encode_decode_round_trips() {
        let s = GameState::initial();
        let array = s.encode();
        let decoded = GameState::decode(&array, Player::Black).unwrap();
        assert_eq!(decoded.board, s.board);
        assert_eq!(decoded.inventory_black, s.inventory_black);
        assert_eq!(decoded.inventory_white, s.inventory_white);
        assert_eq!(decoded.encode(), array);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let bad = vec![0u8; 10];
        assert!(matches!(
            GameState::decode(&bad, Player::Black),
            Err(ContrastError::ArraySize(10))
        ));
    }
}

//! The surface an external session layer (HTTP/JSON, line protocol, GUI) consumes.
//!
//! This is core library surface, not the networked layer itself: §6 requires the core
//! to expose "construct session with AI assignments; apply move by validating against
//! `legal_moves`; enumerate legal moves; render ASCII board; encode/decode the
//! 29-element array", and this module is where that contract lives. Undo/redo
//! bookkeeping is grounded in the teacher's `BLITSAgent` (`past`/`future` stacks).

use crate::core::consts::Player;
use crate::core::rules::{self, Move};
use crate::core::state::{GameState, STATE_ARRAY_LEN};
use crate::errors::ContrastError;

/// Who controls a seat at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    Human,
    Ai,
}

/// The outcome of a session's current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    BlackWin,
    WhiteWin,
}

/// One game in progress: the current state, linear undo/redo history, and which
/// seats are AI-controlled.
pub struct Session {
    state: GameState,
    past: Vec<GameState>,
    future: Vec<GameState>,
    black_seat: Seat,
    white_seat: Seat,
}

impl Session {
    pub fn new(black_seat: Seat, white_seat: Seat) -> Session {
        Session {
            state: GameState::initial(),
            past: Vec::new(),
            future: Vec::new(),
            black_seat,
            white_seat,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seat(&self, player: Player) -> Seat {
        match player {
            Player::Black => self.black_seat,
            Player::White => self.white_seat,
            Player::None => panic!("Player::None has no seat"),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(&self.state)
    }

    pub fn status(&self) -> Status {
        if rules::is_win(&self.state, Player::Black) {
            Status::BlackWin
        } else if rules::is_win(&self.state, Player::White) {
            Status::WhiteWin
        } else {
            Status::Ongoing
        }
    }

    /// Applies `mv` if it is present (field-by-field) in `legal_moves()`; otherwise
    /// reports `InvalidMove` and leaves the session untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ContrastError> {
        if !self.legal_moves().contains(&mv) {
            return Err(ContrastError::InvalidMove(mv));
        }
        self.past.push(self.state);
        self.state = rules::apply_move(&self.state, &mv);
        self.future.clear();
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        if let Some(prev) = self.past.pop() {
            self.future.push(self.state);
            self.state = prev;
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if let Some(next) = self.future.pop() {
            self.past.push(self.state);
            self.state = next;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.state = GameState::initial();
        self.past.clear();
        self.future.clear();
    }

    pub fn board_text(&self) -> String {
        self.state.board.pretty()
    }

    pub fn board_array(&self) -> [u8; STATE_ARRAY_LEN] {
        self.state.encode()
    }
}

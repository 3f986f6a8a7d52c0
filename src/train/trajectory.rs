//! A recorded self-play game: every position reasoned from, plus how the game ended
//! (§4.H).

use crate::core::consts::Player;
use crate::core::state::GameState;

/// One position visited during the game, as seen before a move was chosen from it.
#[derive(Clone, Copy, Debug)]
pub struct Step {
    pub state: GameState,
}

#[derive(Clone, Debug)]
pub struct Trajectory {
    pub steps: Vec<Step>,
    /// `Some(player)` for a decisive game, `None` for a turn-cap draw.
    pub winner: Option<Player>,
}

impl Trajectory {
    /// The scalar outcome of this game from `player`'s point of view: `1.0` for a win,
    /// `-1.0` for a loss, `0.0` for a draw.
    pub fn outcome_for(&self, player: Player) -> f32 {
        match self.winner {
            Some(p) if p == player => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_is_antisymmetric_between_the_two_players() {
        let t = Trajectory {
            steps: Vec::new(),
            winner: Some(Player::Black),
        };
        assert_eq!(t.outcome_for(Player::Black), 1.0);
        assert_eq!(t.outcome_for(Player::White), -1.0);
    }

    #[test]
    fn a_draw_is_zero_for_either_player() {
        let t = Trajectory {
            steps: Vec::new(),
            winner: None,
        };
        assert_eq!(t.outcome_for(Player::Black), 0.0);
        assert_eq!(t.outcome_for(Player::White), 0.0);
    }
}

//! Turns a finished trajectory into a sequence of TD(0) updates (§4.E, §4.H).
//!
//! Every recorded state updates toward the same terminal reward `r` (the game's
//! actual win/loss/draw outcome, read from that state's own mover's perspective),
//! never toward a bootstrapped estimate of a later position: §4.H's updater loop
//! assigns `r` once per finished game and calls `td_update(state, r, lr)` for each
//! recorded state in turn. States played by a non-network opponent (greedy,
//! rule-based) are skipped — there is nothing in them worth crediting to the
//! learner's weights — unless `train_all` is set, which is the pure self-play case
//! where both sides' experience belongs to the same network. This is applied
//! single-threaded by the updater loop, so it never races with a worker's read lock
//! on the same weights.

use crate::core::consts::Player;
use crate::eval::network::Network;
use crate::train::trajectory::Trajectory;

pub fn apply_trajectory(
    network: &mut Network,
    trajectory: &Trajectory,
    lr: f32,
    learner_seat: Player,
    train_all: bool,
) {
    for step in &trajectory.steps {
        if !train_all && step.state.to_move != learner_seat {
            continue;
        }
        let target = trajectory.outcome_for(step.state.to_move);
        network.td_update(&step.state, target, lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::consts::Player;
    use crate::core::state::GameState;
    use crate::train::trajectory::Step;

    #[test]
    fn a_won_game_pushes_the_final_position_toward_a_positive_target() {
        let mut network = Network::new();
        let state = GameState::initial();
        let trajectory = Trajectory {
            steps: vec![Step { state }],
            winner: Some(state.to_move),
        };
        let before = network.evaluate(&state);
        apply_trajectory(&mut network, &trajectory, 0.5, state.to_move, true);
        let after = network.evaluate(&state);
        assert!(after > before);
    }

    #[test]
    fn an_empty_trajectory_updates_nothing() {
        let mut network = Network::new();
        let trajectory = Trajectory {
            steps: Vec::new(),
            winner: Some(Player::Black),
        };
        let before = network.evaluate(&GameState::initial());
        apply_trajectory(&mut network, &trajectory, 0.5, Player::Black, true);
        assert_eq!(network.evaluate(&GameState::initial()), before);
    }

    #[test]
    fn non_learner_states_are_skipped_outside_pure_self_play() {
        let mut network = Network::new();
        let mut opponent_state = GameState::initial();
        opponent_state.to_move = Player::White;
        let trajectory = Trajectory {
            steps: vec![Step { state: opponent_state }],
            winner: Some(Player::Black),
        };
        let before = network.evaluate(&opponent_state);
        apply_trajectory(&mut network, &trajectory, 0.5, Player::Black, false);
        assert_eq!(network.evaluate(&opponent_state), before);
    }
}

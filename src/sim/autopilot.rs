//! Idle/demo mode - a simple bot that plays the game
//!
//! Produces held-input flags the same way a keyboard would, so the result
//! still goes through the input latch.

use super::state::GameState;
use crate::consts::*;
use crate::platform::input::InputState;

/// How far ahead of the player (in world units) an obstacle triggers a jump
const JUMP_LOOKAHEAD: f32 = 60.0;
/// Slack around the target column before the bot stops steering
const STEER_DEADZONE: f32 = 4.0;

/// Decide which keys to hold for the current state
pub fn drive(state: &GameState) -> InputState {
    let player = state.player.bounds();
    let mut input = InputState::default();

    // Jump when the nearest obstacle ahead is about to reach us
    let threat = state
        .obstacles
        .iter()
        .map(|o| o.bounds())
        .filter(|b| b.right() > player.left())
        .map(|b| b.left() - player.right())
        .fold(f32::INFINITY, f32::min);
    if threat < JUMP_LOOKAHEAD {
        input.jump = true;
    }

    // Chase the nearest collectible still in front of us, otherwise drift home
    let target_x = state
        .collectibles
        .iter()
        .map(|c| c.bounds())
        .filter(|b| b.right() > player.left())
        .min_by(|a, b| a.left().total_cmp(&b.left()))
        .map(|b| b.left())
        .unwrap_or(PLAYER_SPAWN_X);

    let dx = target_x - player.left();
    if dx < -STEER_DEADZONE {
        input.move_left = true;
    } else if dx > STEER_DEADZONE {
        input.move_right = true;
    }

    input
}

//! Keyboard/button state to per-tick commands

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Held state of the three controls, as reported by the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Turns held flags into tick commands; jump fires once per press
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    jump_held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the device state at tick start
    pub fn sample(&mut self, held: InputState) -> TickInput {
        let jump = held.jump && !self.jump_held;
        self.jump_held = held.jump;
        TickInput {
            move_left: held.move_left,
            move_right: held.move_right,
            jump,
        }
    }

    /// Forget any held key (new session, focus loss)
    pub fn reset(&mut self) {
        self.jump_held = false;
    }
}

//! Adaptive Arcade - a side-scrolling runner with a rule-based difficulty controller
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, collectibles, particles)
//! - `ai`: Play metrics, adaptation rules, optional remote advisor
//! - `session`: Game lifecycle (menu, playing, paused, game over)
//! - `tuning`: Mutable gameplay parameters and preset tables
//! - `platform`: Storage, input latching, frame timing
//! - `events`: Notifications consumed by the presentation layer

pub mod ai;
pub mod events;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use events::{EventLog, GameEvent, GameListener};
pub use highscores::HighScore;
pub use session::{FinalAnalysis, Game};
pub use settings::Settings;
pub use tuning::GameParameters;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (one display frame at 60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the frame clock (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Floor line (top of the ground strip)
    pub const GROUND_Y: f32 = ARENA_HEIGHT - 50.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 400.0;
    /// Horizontal speed while a direction is held (scaled by control sensitivity)
    pub const BASE_IMPULSE: f32 = 3.0;
    /// Horizontal velocity multiplier per tick when no direction is held
    pub const FRICTION: f32 = 0.8;
    pub const STARTING_LIVES: u8 = 3;

    /// Obstacles sit on the floor
    pub const OBSTACLE_SIZE: f32 = 25.0;

    /// Collectibles float within the jump arc
    pub const COLLECTIBLE_SIZE: f32 = 18.0;
    pub const COLLECTIBLE_SPAWN_CHANCE: f32 = 0.015;
    pub const COLLECTIBLE_MAX_LIFT: f32 = 80.0;
    pub const COLLECTIBLE_MIN_LIFT: f32 = 15.0;
    /// Radians per tick
    pub const COLLECTIBLE_SPIN: f32 = 0.1;

    /// Particle bursts
    pub const BURST_COUNT: usize = 10;
    pub const BURST_SPEED: f32 = 10.0;
    pub const PARTICLE_LIFE_MS: f64 = 1000.0;

    /// Scoring
    pub const OBSTACLE_CLEAR_SCORE: u64 = 10;
    pub const COLLECT_SCORE: u64 = 50;
    pub const LEVEL_SCORE_STEP: u64 = 300;
}

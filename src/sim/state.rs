//! Game state and core simulation types
//!
//! Everything here is per-session: a new session builds a fresh `GameState`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            on_ground: false,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move back to the spawn point with no momentum (after a hit)
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }
}

/// A floor obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// New obstacle at the right edge, resting on the floor
    pub fn at_right_edge() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH, GROUND_Y - OBSTACLE_SIZE),
            size: Vec2::splat(OBSTACLE_SIZE),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A spinning score pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
}

impl Collectible {
    /// New collectible at the right edge, `y` is the top of its box
    pub fn at_right_edge(y: f32) -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH, y),
            size: Vec2::splat(COLLECTIBLE_SIZE),
            rotation: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// What produced a particle burst (drives color in the presentation layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    Collect,
    Hit,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BurstKind,
    /// Remaining lifetime in milliseconds
    pub life_ms: f64,
}

/// Score, level, lives and play clock for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    /// Elapsed play time in milliseconds (paused time excluded)
    pub game_time_ms: f64,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            game_time_ms: 0.0,
        }
    }
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Insertion-ordered; oldest at the front
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    /// Oldest first, so the cap evicts from the front
    pub particles: VecDeque<Particle>,
    pub stats: SessionStats,
}

impl GameState {
    /// Create a fresh session state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: VecDeque::new(),
            stats: SessionStats::default(),
        }
    }
}

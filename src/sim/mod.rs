//! Deterministic simulation module
//!
//! All gameplay physics lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Insertion-ordered entity collections
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    BurstKind, Collectible, GamePhase, GameState, Obstacle, Particle, Player, SessionStats,
};
pub use tick::{SimConfig, SimEvent, TickInput, spawn_burst, tick};

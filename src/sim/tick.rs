//! Fixed timestep simulation tick
//!
//! Advances the player, scrolls entities, spawns new ones and resolves
//! collisions. Parameters are read-only here; only the adaptation rules
//! write them.

use glam::Vec2;
use rand::Rng;

use super::state::{BurstKind, Collectible, GamePhase, GameState, Obstacle, Particle};
use crate::consts::*;
use crate::tuning::GameParameters;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump pressed this tick (edge, not held)
    pub jump: bool,
}

/// Presentation-dependent knobs the simulation honours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Spawn particle bursts at all
    pub particles: bool,
    /// Cap on live particles; the oldest is evicted first
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particles: true,
            max_particles: 256,
        }
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// An obstacle scrolled off the left edge
    ObstacleCleared,
    /// The player touched an obstacle
    Hit { lives_remaining: u8 },
    /// The player picked up a collectible
    Collected { score_delta: u64, pos: Vec2 },
}

/// Advance the game state by one tick of `dt_ms` milliseconds.
///
/// Does nothing unless the phase is `Playing`.
pub fn tick(
    state: &mut GameState,
    params: &GameParameters,
    input: &TickInput,
    dt_ms: f64,
    config: &SimConfig,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.stats.game_time_ms += dt_ms;

    if input.jump {
        jump(state, params);
    }
    update_player(state, params, input);
    update_obstacles(state, params, &mut events);
    update_collectibles(state, params);
    update_particles(state, dt_ms);
    spawn_entities(state, params);
    resolve_collisions(state, config, &mut events);

    events
}

/// Jump only takes effect from the ground
pub fn jump(state: &mut GameState, params: &GameParameters) {
    if state.player.on_ground {
        state.player.vel.y = -params.jump_power;
        state.player.on_ground = false;
    }
}

fn update_player(state: &mut GameState, params: &GameParameters, input: &TickInput) {
    let player = &mut state.player;

    if input.move_left {
        player.vel.x = -BASE_IMPULSE * params.control_sensitivity;
    } else if input.move_right {
        player.vel.x = BASE_IMPULSE * params.control_sensitivity;
    } else {
        player.vel.x *= FRICTION;
    }

    player.vel.y += params.gravity;
    player.pos += player.vel;

    // Floor
    if player.pos.y + player.size.y >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.vel.y = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }

    // Ceiling
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel.y = 0.0;
    }

    player.pos.x = player.pos.x.clamp(0.0, ARENA_WIDTH - player.size.x);
}

fn update_obstacles(state: &mut GameState, params: &GameParameters, events: &mut Vec<SimEvent>) {
    let mut cleared = 0u64;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.x -= params.speed;
        let on_screen = obstacle.bounds().right() >= 0.0;
        if !on_screen {
            cleared += 1;
        }
        on_screen
    });

    state.stats.score += cleared * OBSTACLE_CLEAR_SCORE;
    for _ in 0..cleared {
        events.push(SimEvent::ObstacleCleared);
    }
}

fn update_collectibles(state: &mut GameState, params: &GameParameters) {
    state.collectibles.retain_mut(|collectible| {
        collectible.pos.x -= params.speed;
        collectible.rotation += COLLECTIBLE_SPIN;
        collectible.bounds().right() >= 0.0
    });
}

fn update_particles(state: &mut GameState, dt_ms: f64) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life_ms -= dt_ms;
    }
    state.particles.retain(|p| p.life_ms > 0.0);
}

fn spawn_entities(state: &mut GameState, params: &GameParameters) {
    if state.rng.random::<f32>() < params.obstacle_frequency {
        state.obstacles.push(Obstacle::at_right_edge());
    }

    if state.rng.random::<f32>() < COLLECTIBLE_SPAWN_CHANCE {
        let lift = state.rng.random::<f32>() * COLLECTIBLE_MAX_LIFT;
        let y = GROUND_Y - lift - COLLECTIBLE_MIN_LIFT;
        state.collectibles.push(Collectible::at_right_edge(y));
    }
}

fn resolve_collisions(state: &mut GameState, config: &SimConfig, events: &mut Vec<SimEvent>) {
    let player_box = state.player.bounds();
    if state
        .obstacles
        .iter()
        .any(|obstacle| player_box.overlaps(&obstacle.bounds()))
    {
        state.stats.lives = state.stats.lives.saturating_sub(1);
        let at = state.player.pos;
        spawn_burst(state, config, at, BurstKind::Hit);
        if state.stats.lives > 0 {
            state.player.respawn();
        }
        events.push(SimEvent::Hit {
            lives_remaining: state.stats.lives,
        });
    }

    // Pickups are checked where the player ends the tick, after any respawn
    let player_box = state.player.bounds();
    let mut collected = Vec::new();
    state.collectibles.retain(|collectible| {
        let hit = player_box.overlaps(&collectible.bounds());
        if hit {
            collected.push(collectible.pos);
        }
        !hit
    });

    for pos in collected {
        state.stats.score += COLLECT_SCORE;
        spawn_burst(state, config, pos, BurstKind::Collect);
        events.push(SimEvent::Collected {
            score_delta: COLLECT_SCORE,
            pos,
        });
    }
}

/// Spawn a fixed-count burst of particles at `pos`
pub fn spawn_burst(state: &mut GameState, config: &SimConfig, pos: Vec2, kind: BurstKind) {
    if !config.particles || config.max_particles == 0 {
        return;
    }
    for _ in 0..BURST_COUNT {
        if state.particles.len() >= config.max_particles {
            state.particles.pop_front();
        }
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * BURST_SPEED,
            (state.rng.random::<f32>() - 0.5) * BURST_SPEED,
        );
        state.particles.push_back(Particle {
            pos,
            vel,
            kind,
            life_ms: PARTICLE_LIFE_MS,
        });
    }
}

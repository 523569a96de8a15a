//! Gameplay parameters and preset tables
//!
//! `GameParameters` is the only value the adaptation rules write. The
//! simulation reads it each tick. Every mutation ends with `clamp()` so the
//! spawn probability never leaves [0, 1] and the scroll speed never drops
//! below its floor.

use serde::{Deserialize, Serialize};

/// Lowest scroll speed any rule may produce
pub const MIN_SPEED: f32 = 1.0;
/// Lowest obstacle spawn probability a difficulty reduction may produce
pub const MIN_OBSTACLE_FREQUENCY: f32 = 0.005;
/// Spawn probability is a per-tick chance
pub const MAX_OBSTACLE_FREQUENCY: f32 = 1.0;

/// Tunable gameplay parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameParameters {
    /// Scroll speed (world units per tick)
    pub speed: f32,
    /// Probability of an obstacle spawning on a given tick
    pub obstacle_frequency: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Initial upward velocity of a jump
    pub jump_power: f32,
    /// Multiplier on horizontal input
    pub control_sensitivity: f32,
}

impl GameParameters {
    /// Baseline every session starts from
    pub const DEFAULT: GameParameters = GameParameters {
        speed: 2.0,
        obstacle_frequency: 0.01,
        gravity: 0.4,
        jump_power: 12.0,
        control_sensitivity: 1.0,
    };

    /// Enforce the parameter floors and ceilings
    pub fn clamp(&mut self) {
        if !self.speed.is_finite() || self.speed < MIN_SPEED {
            self.speed = MIN_SPEED;
        }
        self.obstacle_frequency = if self.obstacle_frequency.is_finite() {
            self.obstacle_frequency.clamp(0.0, MAX_OBSTACLE_FREQUENCY)
        } else {
            Self::DEFAULT.obstacle_frequency
        };
    }

    /// Lower speed and obstacle density, respecting the floors
    pub fn ease(&mut self, speed_step: f32, frequency_step: f32) {
        self.speed = (self.speed - speed_step).max(MIN_SPEED);
        self.obstacle_frequency =
            (self.obstacle_frequency - frequency_step).max(MIN_OBSTACLE_FREQUENCY);
        self.clamp();
    }

    /// Raise speed and obstacle density
    pub fn harden(&mut self, speed_step: f32, frequency_step: f32) {
        self.speed += speed_step;
        self.obstacle_frequency += frequency_step;
        self.clamp();
    }

    /// Whether every field is within the enforced bounds
    pub fn is_valid(&self) -> bool {
        self.speed >= MIN_SPEED
            && (0.0..=MAX_OBSTACLE_FREQUENCY).contains(&self.obstacle_frequency)
    }
}

impl Default for GameParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Gravity presets for the variety rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityPreset {
    Light,
    Heavy,
    Normal,
}

impl GravityPreset {
    pub const ALL: [GravityPreset; 3] = [Self::Light, Self::Heavy, Self::Normal];

    pub fn value(&self) -> f32 {
        match self {
            GravityPreset::Light => 0.35,
            GravityPreset::Heavy => 0.6,
            GravityPreset::Normal => 0.4,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            GravityPreset::Light => "LIGHT_GRAVITY",
            GravityPreset::Heavy => "HEAVY_GRAVITY",
            GravityPreset::Normal => "NORMAL_GRAVITY",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GravityPreset::Light => "Light gravity! Slightly floatier jumps.",
            GravityPreset::Heavy => "Heavy gravity! Faster falling.",
            GravityPreset::Normal => "Gravity normalized.",
        }
    }
}

/// Control sensitivity presets for the variety rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPreset {
    Precision,
    Turbo,
    Smooth,
}

impl ControlPreset {
    pub const ALL: [ControlPreset; 3] = [Self::Precision, Self::Turbo, Self::Smooth];

    pub fn value(&self) -> f32 {
        match self {
            ControlPreset::Precision => 0.6,
            ControlPreset::Turbo => 1.4,
            ControlPreset::Smooth => 0.8,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ControlPreset::Precision => "PRECISION_MODE",
            ControlPreset::Turbo => "TURBO_MODE",
            ControlPreset::Smooth => "SMOOTH_MODE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ControlPreset::Precision => "Precision controls activated. Steady movements required.",
            ControlPreset::Turbo => "Turbo controls! Lightning fast movement.",
            ControlPreset::Smooth => "Smooth sailing mode. Gentle control adjustments.",
        }
    }
}

/// Multi-parameter bundles for the chaos rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaosBundle {
    Chaos,
    Lightning,
    Zen,
}

impl ChaosBundle {
    pub const ALL: [ChaosBundle; 3] = [Self::Chaos, Self::Lightning, Self::Zen];

    /// Overwrite the fields this bundle controls; the rest are left alone
    pub fn apply(&self, params: &mut GameParameters) {
        match self {
            ChaosBundle::Chaos => {
                params.speed = 1.5;
                params.obstacle_frequency = 0.01;
                params.gravity = 0.3;
            }
            ChaosBundle::Lightning => {
                params.speed = 3.0;
                params.obstacle_frequency = 0.03;
                params.control_sensitivity = 1.2;
            }
            ChaosBundle::Zen => {
                params.speed = 1.0;
                params.obstacle_frequency = 0.005;
                params.gravity = 0.1;
            }
        }
        params.clamp();
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChaosBundle::Chaos => "CHAOS MODE: Random parameters! Expect the unexpected!",
            ChaosBundle::Lightning => "LIGHTNING MODE: Everything is faster! Can you keep up?",
            ChaosBundle::Zen => "ZEN MODE: Slow and steady. Find your inner peace.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameParameters::DEFAULT.is_valid());
        assert_eq!(GameParameters::default(), GameParameters::DEFAULT);
    }

    #[test]
    fn test_ease_respects_floors() {
        let mut params = GameParameters {
            speed: 1.1,
            obstacle_frequency: 0.006,
            ..GameParameters::DEFAULT
        };
        params.ease(0.3, 0.003);
        assert_eq!(params.speed, MIN_SPEED);
        assert_eq!(params.obstacle_frequency, MIN_OBSTACLE_FREQUENCY);
    }

    #[test]
    fn test_clamp_repairs_out_of_range() {
        let mut params = GameParameters {
            speed: -4.0,
            obstacle_frequency: 1.7,
            ..GameParameters::DEFAULT
        };
        params.clamp();
        assert!(params.is_valid());
        assert_eq!(params.obstacle_frequency, MAX_OBSTACLE_FREQUENCY);

        params.obstacle_frequency = -0.2;
        params.clamp();
        assert_eq!(params.obstacle_frequency, 0.0);

        params.speed = f32::NAN;
        params.clamp();
        assert_eq!(params.speed, MIN_SPEED);
    }

    #[test]
    fn test_chaos_bundles_only_touch_their_fields() {
        let mut params = GameParameters::DEFAULT;
        ChaosBundle::Lightning.apply(&mut params);
        assert_eq!(params.speed, 3.0);
        assert_eq!(params.control_sensitivity, 1.2);
        assert_eq!(params.gravity, GameParameters::DEFAULT.gravity);

        let mut params = GameParameters::DEFAULT;
        ChaosBundle::Zen.apply(&mut params);
        assert_eq!(params.gravity, 0.1);
        assert_eq!(params.control_sensitivity, 1.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&GameParameters::DEFAULT).unwrap();
        assert!(json.contains("\"obstacleFrequency\""));
        assert!(json.contains("\"controlSensitivity\""));
    }
}

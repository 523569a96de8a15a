//! Rule-based difficulty adaptation
//!
//! Every analysis interval the engine walks a fixed priority list and
//! applies the first rule that matches. Rules with a random component draw
//! through [`Roll`] so tests can script the outcome.

use rand::Rng;

use super::metrics::MetricsSnapshot;
use crate::tuning::{ChaosBundle, ControlPreset, GameParameters, GravityPreset};

/// Error count at which the one-time assist kicks in
pub const ASSIST_THRESHOLD: u32 = 3;

/// Source of the engine's random decisions
pub trait Roll {
    /// True with the given probability
    fn chance(&mut self, probability: f64) -> bool;
    /// Uniform index in `0..len`
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> Roll for R {
    fn chance(&mut self, probability: f64) -> bool {
        self.random_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// The adaptation rules, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    DifficultyUp,
    DifficultyDown,
    GravityVariety,
    ControlVariety,
    LevelUp,
    Chaos,
}

impl Rule {
    pub const PRIORITY: [Rule; 6] = [
        Rule::DifficultyUp,
        Rule::DifficultyDown,
        Rule::GravityVariety,
        Rule::ControlVariety,
        Rule::LevelUp,
        Rule::Chaos,
    ];

    /// Apply this rule if its conditions hold
    fn try_apply<R: Roll + ?Sized>(
        self,
        metrics: &MetricsSnapshot,
        params: &mut GameParameters,
        level: &mut u32,
        roll: &mut R,
    ) -> Option<AdaptationKind> {
        let survival = metrics.survival_seconds;
        match self {
            Rule::DifficultyUp => {
                if survival > 20.0 && metrics.error_rate < 0.1 && params.speed < 3.0 {
                    params.harden(0.2, 0.002);
                    Some(AdaptationKind::DifficultyUp)
                } else {
                    None
                }
            }
            Rule::DifficultyDown => {
                if metrics.error_rate > 0.3 && params.speed > 1.0 {
                    params.ease(0.3, 0.003);
                    Some(AdaptationKind::DifficultyDown)
                } else {
                    None
                }
            }
            Rule::GravityVariety => {
                if survival > 15.0 && roll.chance(0.3) {
                    let preset = GravityPreset::ALL[roll.pick(GravityPreset::ALL.len())];
                    params.gravity = preset.value();
                    Some(AdaptationKind::Gravity(preset))
                } else {
                    None
                }
            }
            Rule::ControlVariety => {
                if roll.chance(0.2) {
                    let preset = ControlPreset::ALL[roll.pick(ControlPreset::ALL.len())];
                    params.control_sensitivity = preset.value();
                    Some(AdaptationKind::Control(preset))
                } else {
                    None
                }
            }
            Rule::LevelUp => {
                if metrics.score > u64::from(*level) * crate::consts::LEVEL_SCORE_STEP {
                    *level += 1;
                    params.speed += 0.1;
                    Some(AdaptationKind::LevelUp { level: *level })
                } else {
                    None
                }
            }
            Rule::Chaos => {
                if survival > 10.0 && roll.chance(0.3) {
                    let bundle = ChaosBundle::ALL[roll.pick(ChaosBundle::ALL.len())];
                    bundle.apply(params);
                    Some(AdaptationKind::Chaos(bundle))
                } else {
                    None
                }
            }
        }
    }
}

/// Which change was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptationKind {
    DifficultyUp,
    DifficultyDown,
    Gravity(GravityPreset),
    Control(ControlPreset),
    LevelUp { level: u32 },
    Chaos(ChaosBundle),
    /// Error-triggered help, outside the priority list
    Assist,
}

impl AdaptationKind {
    pub fn id(&self) -> &'static str {
        match self {
            AdaptationKind::DifficultyUp => "DIFFICULTY_UP",
            AdaptationKind::DifficultyDown => "DIFFICULTY_DOWN",
            AdaptationKind::Gravity(preset) => preset.id(),
            AdaptationKind::Control(preset) => preset.id(),
            AdaptationKind::LevelUp { .. } => "LEVEL_UP",
            AdaptationKind::Chaos(_) => "CHAOS_MODE",
            AdaptationKind::Assist => "AI_ASSIST",
        }
    }

    fn reason(&self, metrics: &MetricsSnapshot) -> String {
        match self {
            AdaptationKind::DifficultyUp => format!(
                "NICE WORK: Survived {:.1}s! Adding slight challenge.",
                metrics.survival_seconds
            ),
            AdaptationKind::DifficultyDown => {
                "HELPING HAND: Making it easier so you can enjoy the game!".to_string()
            }
            AdaptationKind::Gravity(preset) => preset.description().to_string(),
            AdaptationKind::Control(preset) => preset.description().to_string(),
            AdaptationKind::LevelUp { level } => format!(
                "LEVEL {} UNLOCKED! Score: {}. Keep going!",
                level, metrics.score
            ),
            AdaptationKind::Chaos(bundle) => bundle.description().to_string(),
            AdaptationKind::Assist => "AI ASSIST: Reducing difficulty after multiple hits!".to_string(),
        }
    }
}

/// A parameter change with its explanation
#[derive(Debug, Clone, PartialEq)]
pub struct Adaptation {
    pub kind: AdaptationKind,
    pub reason: String,
    /// Parameters after the change
    pub params: GameParameters,
}

/// Result of one analysis pass
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Adapted(Adaptation),
    /// Nothing matched; human-readable monitoring line
    Status(String),
}

/// Priority-ordered rule evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply at most one rule. `level` is bumped by the level-up rule.
    pub fn evaluate<R: Roll + ?Sized>(
        &self,
        metrics: &MetricsSnapshot,
        params: &mut GameParameters,
        level: &mut u32,
        roll: &mut R,
    ) -> Analysis {
        for rule in Rule::PRIORITY {
            if let Some(kind) = rule.try_apply(metrics, params, level, roll) {
                params.clamp();
                let adaptation = Adaptation {
                    kind,
                    reason: kind.reason(metrics),
                    params: *params,
                };
                log::info!("Adaptation {}: {}", kind.id(), adaptation.reason);
                return Analysis::Adapted(adaptation);
            }
        }

        Analysis::Status(format!(
            "Monitoring: {:.1}s survival, {:.1}% errors, Score: {}",
            metrics.survival_seconds,
            metrics.error_rate * 100.0,
            metrics.score
        ))
    }
}

/// One-time help when the error count reaches the threshold.
///
/// Fires only on the hit that makes `error_count` equal the threshold, so
/// later hits in the same session do not stack further reductions.
pub fn assist(params: &mut GameParameters, error_count: u32) -> Option<Adaptation> {
    if error_count != ASSIST_THRESHOLD {
        return None;
    }
    params.ease(0.2, 0.002);
    let kind = AdaptationKind::Assist;
    let adaptation = Adaptation {
        kind,
        reason: kind.reason(&MetricsSnapshot::default()),
        params: *params,
    };
    log::info!("Assist after {} hits: speed {:.2}", error_count, params.speed);
    Some(adaptation)
}

//! Play metrics the adaptation rules read
//!
//! All of this resets with the session.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::GameParameters;

/// Number of movement samples kept
pub const MOVEMENT_WINDOW: usize = 100;

/// Player position at a point in play time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementSample {
    pub pos: Vec2,
    pub time_ms: f64,
}

/// One applied adaptation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationRecord {
    /// Play time when it was applied
    pub time_ms: f64,
    pub adaptation_id: String,
    pub reason: String,
    /// Parameters right after the change
    pub params: GameParameters,
}

/// Derived values for one rule evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub survival_seconds: f64,
    pub error_rate: f64,
    pub average_reaction_ms: f64,
    pub score: u64,
}

/// Per-session tracking data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiData {
    pub survival_time_ms: f64,
    /// Oldest first, bounded by `MOVEMENT_WINDOW`
    pub movement_patterns: VecDeque<MovementSample>,
    pub error_count: u32,
    pub last_analysis_ms: f64,
    pub adaptation_history: Vec<AdaptationRecord>,
}

impl AiData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the player's position for this tick
    pub fn record_movement(&mut self, pos: Vec2, time_ms: f64) {
        if self.movement_patterns.len() == MOVEMENT_WINDOW {
            self.movement_patterns.pop_front();
        }
        self.movement_patterns.push_back(MovementSample { pos, time_ms });
    }

    /// Count a hit; returns the new error count
    pub fn record_error(&mut self) -> u32 {
        self.error_count += 1;
        self.error_count
    }

    pub fn survival_seconds(&self) -> f64 {
        self.survival_time_ms / 1000.0
    }

    /// Hits per second of survival. Survival under one second counts as one
    /// second so early hits do not blow the rate up.
    pub fn error_rate(&self) -> f64 {
        self.error_count as f64 / self.survival_seconds().max(1.0)
    }

    /// Mean time between consecutive movement samples.
    ///
    /// This is a frame-pacing heuristic standing in for reaction time, not a
    /// measurement of how fast the player responds.
    pub fn average_reaction_ms(&self) -> f64 {
        let n = self.movement_patterns.len();
        if n < 2 {
            return 0.0;
        }
        let total: f64 = self
            .movement_patterns
            .iter()
            .zip(self.movement_patterns.iter().skip(1))
            .map(|(a, b)| b.time_ms - a.time_ms)
            .sum();
        total / (n - 1) as f64
    }

    /// Whether an analysis is due at `now_ms`
    pub fn analysis_due(&self, now_ms: f64, interval_ms: f64) -> bool {
        now_ms - self.last_analysis_ms > interval_ms
    }

    pub fn snapshot(&self, score: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            survival_seconds: self.survival_seconds(),
            error_rate: self.error_rate(),
            average_reaction_ms: self.average_reaction_ms(),
            score,
        }
    }

    pub fn record_adaptation(&mut self, record: AdaptationRecord) {
        self.adaptation_history.push(record);
    }
}

//! Notifications for the presentation layer
//!
//! The core never draws anything. It reports what happened through a
//! [`GameListener`]; the UI decides how to show it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::session::FinalAnalysis;
use crate::tuning::GameParameters;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Fresh session, parameters back at their defaults
    SessionStarted,
    /// Parameters were changed by the rule engine or the assist
    #[serde(rename_all = "camelCase")]
    Adaptation {
        id: String,
        reason: String,
        params: GameParameters,
    },
    /// Analysis ran but nothing changed
    Status { reason: String },
    #[serde(rename_all = "camelCase")]
    Hit { lives_remaining: u8 },
    #[serde(rename_all = "camelCase")]
    Collect { score_delta: u64 },
    #[serde(rename_all = "camelCase")]
    LevelUp { new_level: u32 },
    #[serde(rename_all = "camelCase")]
    GameOver {
        final_score: u64,
        new_high_score: bool,
    },
    FinalAnalysis(FinalAnalysis),
}

/// Observer for game events; implement only what you need
pub trait GameListener {
    fn on_session_start(&mut self) {}
    fn on_adaptation(&mut self, _id: &str, _reason: &str, _params: &GameParameters) {}
    fn on_status(&mut self, _reason: &str) {}
    fn on_hit(&mut self, _lives_remaining: u8) {}
    fn on_collect(&mut self, _score_delta: u64) {}
    fn on_level_up(&mut self, _new_level: u32) {}
    fn on_game_over(&mut self, _final_score: u64, _is_new_high_score: bool) {}
    fn on_final_analysis(&mut self, _summary: &FinalAnalysis) {}

    /// Route an event to the matching callback
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted => self.on_session_start(),
            GameEvent::Adaptation { id, reason, params } => self.on_adaptation(id, reason, params),
            GameEvent::Status { reason } => self.on_status(reason),
            GameEvent::Hit { lives_remaining } => self.on_hit(*lives_remaining),
            GameEvent::Collect { score_delta } => self.on_collect(*score_delta),
            GameEvent::LevelUp { new_level } => self.on_level_up(*new_level),
            GameEvent::GameOver {
                final_score,
                new_high_score,
            } => self.on_game_over(*final_score, *new_high_score),
            GameEvent::FinalAnalysis(summary) => self.on_final_analysis(summary),
        }
    }
}

/// Ignores everything
impl GameListener for () {}

/// Shared, clonable record of every event (tests, polling UIs)
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl GameListener for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Writes events to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl GameListener for LogListener {
    fn on_session_start(&mut self) {
        log::info!("Fresh start! All parameters reset to normal.");
    }

    fn on_adaptation(&mut self, id: &str, reason: &str, params: &GameParameters) {
        log::info!(
            "AI: {} - {} (speed {:.2}, obstacles {:.3}, gravity {:.2}, control {:.2})",
            id,
            reason,
            params.speed,
            params.obstacle_frequency,
            params.gravity,
            params.control_sensitivity
        );
    }

    fn on_status(&mut self, reason: &str) {
        log::debug!("{}", reason);
    }

    fn on_hit(&mut self, lives_remaining: u8) {
        log::info!("Hit! {} lives left", lives_remaining);
    }

    fn on_level_up(&mut self, new_level: u32) {
        log::info!("Level {} unlocked", new_level);
    }

    fn on_game_over(&mut self, final_score: u64, is_new_high_score: bool) {
        if is_new_high_score {
            log::info!("Game over - NEW HIGH SCORE {}", final_score);
        } else {
            log::info!("Game over - score {}", final_score);
        }
    }

    fn on_final_analysis(&mut self, summary: &FinalAnalysis) {
        log::info!("{}", summary);
    }
}

//! Session lifecycle and the per-frame update
//!
//! `Game` owns everything: simulation state, the parameter record, the
//! metrics, the rule engine and the collaborators (store, listener,
//! advisor). The presentation layer calls `start`, `toggle_pause` and
//! `update`, and reads state back through the accessors.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::ai::{
    Advisor, AdaptationKind, AdaptationRecord, AiData, Analysis, AnalysisRequest, NullAdvisor,
    RuleEngine, assist,
};
use crate::events::{GameEvent, GameListener};
use crate::highscores::HighScore;
use crate::platform::input::{InputLatch, InputState};
use crate::platform::storage::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, SessionStats, SimEvent, tick};
use crate::tuning::GameParameters;

/// Mixed into the session seed so the rule engine draws from its own stream
const RULE_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Coarse skill rating from the error rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn from_error_rate(error_rate: f64) -> Self {
        if error_rate < 0.3 {
            SkillLevel::Advanced
        } else if error_rate < 0.6 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Beginner
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Excellent,
    KeepPracticing,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent performance!",
            Verdict::KeepPracticing => "Keep practicing!",
        }
    }
}

/// End-of-session summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAnalysis {
    pub survival_seconds: f64,
    pub error_rate: f64,
    pub adaptation_count: usize,
    pub final_score: u64,
    pub skill: SkillLevel,
    /// 0-100, rewards survival and penalises hits
    pub engagement_score: f64,
    pub verdict: Verdict,
    pub new_high_score: bool,
}

impl FinalAnalysis {
    /// `high_score` is the best score after this session was submitted
    pub fn new(ai: &AiData, final_score: u64, high_score: u64, new_high_score: bool) -> Self {
        let survival_seconds = ai.survival_seconds();
        let error_rate = ai.error_rate();
        let verdict = if final_score.saturating_mul(2) > high_score {
            Verdict::Excellent
        } else {
            Verdict::KeepPracticing
        };
        Self {
            survival_seconds,
            error_rate,
            adaptation_count: ai.adaptation_history.len(),
            final_score,
            skill: SkillLevel::from_error_rate(error_rate),
            engagement_score: (survival_seconds * 2.0 - error_rate * 50.0).clamp(0.0, 100.0),
            verdict,
            new_high_score,
        }
    }
}

impl fmt::Display for FinalAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FINAL ANALYSIS: {:.1}s survival, {} AI adaptations made. {}",
            self.survival_seconds,
            self.adaptation_count,
            self.verdict.as_str()
        )
    }
}

/// The game controller
pub struct Game {
    state: GameState,
    params: GameParameters,
    ai: AiData,
    engine: RuleEngine,
    /// Rule engine randomness, reseeded per session
    rule_rng: Pcg32,
    /// Source of per-session seeds
    seeds: Pcg32,
    latch: InputLatch,
    settings: Settings,
    high_score: HighScore,
    final_analysis: Option<FinalAnalysis>,
    store: Box<dyn KeyValueStore>,
    listener: Box<dyn GameListener>,
    advisor: Box<dyn Advisor>,
}

impl Game {
    /// Create a game in the menu, loading settings and high score from `store`
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed),
            params: GameParameters::DEFAULT,
            ai: AiData::new(),
            engine: RuleEngine::new(),
            rule_rng: Pcg32::seed_from_u64(seed ^ RULE_STREAM_SALT),
            seeds: Pcg32::seed_from_u64(seed),
            latch: InputLatch::new(),
            settings,
            high_score,
            final_analysis: None,
            store,
            listener: Box::new(()),
            advisor: Box::new(NullAdvisor),
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn GameListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_advisor(mut self, advisor: Box<dyn Advisor>) -> Self {
        self.advisor = advisor;
        self
    }

    /// Replace the settings for this run without persisting them
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace and persist the settings
    pub fn set_settings(&mut self, settings: Settings) {
        settings.save(self.store.as_mut());
        self.settings = settings;
    }

    // === Lifecycle ===

    /// Begin a new session from any phase, resetting all per-session state
    pub fn start(&mut self) {
        let session_seed: u64 = self.seeds.random();
        self.state = GameState::new(session_seed);
        self.state.phase = GamePhase::Playing;
        self.params = GameParameters::DEFAULT;
        self.ai = AiData::new();
        self.rule_rng = Pcg32::seed_from_u64(session_seed ^ RULE_STREAM_SALT);
        self.latch.reset();
        self.final_analysis = None;

        log::info!(
            "Game reset - all parameters restored to defaults (seed {})",
            session_seed
        );
        self.emit(GameEvent::SessionStarted);
    }

    /// Playing <-> Paused; ignored in any other phase
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.state.phase = match self.state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
        self.state.phase
    }

    /// Advance one tick of `dt_ms`. No-op unless playing.
    pub fn update(&mut self, held: InputState, dt_ms: f64) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let input = self.latch.sample(held);
        self.ai.survival_time_ms += dt_ms;

        let sim_events = tick(
            &mut self.state,
            &self.params,
            &input,
            dt_ms,
            &self.settings.sim_config(),
        );
        self.ai
            .record_movement(self.state.player.pos, self.state.stats.game_time_ms);

        for event in sim_events {
            match event {
                SimEvent::Hit { lives_remaining } => self.on_hit(lives_remaining),
                SimEvent::Collected { score_delta, .. } => {
                    self.emit(GameEvent::Collect { score_delta })
                }
                SimEvent::ObstacleCleared => {}
            }
        }

        if self.state.stats.lives == 0 {
            self.game_over();
            return;
        }

        let now = self.state.stats.game_time_ms;
        if self.ai.analysis_due(now, self.settings.analysis_interval_ms) {
            self.analyze();
            self.ai.last_analysis_ms = now;
        }
    }

    fn on_hit(&mut self, lives_remaining: u8) {
        let errors = self.ai.record_error();
        self.emit(GameEvent::Hit { lives_remaining });

        if let Some(adaptation) = assist(&mut self.params, errors) {
            self.emit(GameEvent::Adaptation {
                id: adaptation.kind.id().to_string(),
                reason: adaptation.reason,
                params: adaptation.params,
            });
        }
    }

    /// Run the rule engine once
    fn analyze(&mut self) {
        let snapshot = self.ai.snapshot(self.state.stats.score);
        let analysis = self.engine.evaluate(
            &snapshot,
            &mut self.params,
            &mut self.state.stats.level,
            &mut self.rule_rng,
        );

        match analysis {
            Analysis::Adapted(adaptation) => {
                let id = adaptation.kind.id().to_string();
                self.ai.record_adaptation(AdaptationRecord {
                    time_ms: self.state.stats.game_time_ms,
                    adaptation_id: id.clone(),
                    reason: adaptation.reason.clone(),
                    params: adaptation.params,
                });
                self.emit(GameEvent::Adaptation {
                    id,
                    reason: adaptation.reason,
                    params: adaptation.params,
                });
                if let AdaptationKind::LevelUp { level } = adaptation.kind {
                    self.emit(GameEvent::LevelUp { new_level: level });
                }

                if self.settings.advisor_enabled {
                    self.advisor.report(AnalysisRequest {
                        survival_time: snapshot.survival_seconds,
                        error_rate: snapshot.error_rate,
                        score: snapshot.score,
                        current_params: self.params,
                    });
                }
            }
            Analysis::Status(reason) => self.emit(GameEvent::Status { reason }),
        }
    }

    fn game_over(&mut self) {
        self.state.phase = GamePhase::GameOver;
        let score = self.state.stats.score;

        let new_high_score = self.high_score.submit(score);
        if new_high_score {
            self.high_score.save(self.store.as_mut());
        }

        let summary = FinalAnalysis::new(&self.ai, score, self.high_score.best(), new_high_score);
        log::info!("{}", summary);

        self.emit(GameEvent::GameOver {
            final_score: score,
            new_high_score,
        });
        self.emit(GameEvent::FinalAnalysis(summary.clone()));
        self.final_analysis = Some(summary);
    }

    fn emit(&mut self, event: GameEvent) {
        self.listener.on_event(&event);
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn params(&self) -> &GameParameters {
        &self.params
    }

    pub fn stats(&self) -> &SessionStats {
        &self.state.stats
    }

    pub fn ai_data(&self) -> &AiData {
        &self.ai
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Summary of the last finished session
    pub fn final_analysis(&self) -> Option<&FinalAnalysis> {
        self.final_analysis.as_ref()
    }

    /// Held keys the demo bot would press right now
    pub fn autopilot_input(&self) -> InputState {
        crate::sim::autopilot::drive(&self.state)
    }

    /// Mutable access for scripted scenarios
    #[cfg(any(test, feature = "test-util"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn ai_data_mut(&mut self) -> &mut AiData {
        &mut self.ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::events::EventLog;
    use crate::platform::storage::MemoryStore;

    fn game() -> (Game, EventLog) {
        let log = EventLog::new();
        let game = Game::new(42, Box::new(MemoryStore::new())).with_listener(Box::new(log.clone()));
        (game, log)
    }

    #[test]
    fn test_menu_until_started() {
        let (mut game, log) = game();
        assert_eq!(game.phase(), GamePhase::Menu);
        game.update(InputState::default(), TICK_MS);
        assert_eq!(game.stats().game_time_ms, 0.0);
        assert!(log.events().is_empty());

        game.start();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(log.events(), vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_pause_toggle() {
        let (mut game, _) = game();
        // Not valid from the menu
        assert_eq!(game.toggle_pause(), GamePhase::Menu);

        game.start();
        assert_eq!(game.toggle_pause(), GamePhase::Paused);
        game.update(InputState::default(), TICK_MS);
        assert_eq!(game.stats().game_time_ms, 0.0);
        assert_eq!(game.ai_data().survival_time_ms, 0.0);

        assert_eq!(game.toggle_pause(), GamePhase::Playing);
        game.update(InputState::default(), TICK_MS);
        assert!(game.stats().game_time_ms > 0.0);
    }

    #[test]
    fn test_survival_mirrors_game_time() {
        let (mut game, _) = game();
        game.start();
        for _ in 0..30 {
            game.update(InputState::default(), TICK_MS);
        }
        assert_eq!(game.ai_data().survival_time_ms, game.stats().game_time_ms);
        assert_eq!(game.ai_data().movement_patterns.len(), 30);
    }

    #[test]
    fn test_start_resets_everything() {
        let (mut game, _) = game();
        game.start();
        for _ in 0..200 {
            game.update(InputState::default(), TICK_MS);
        }
        game.params.speed = 2.9;
        game.params.gravity = 0.1;
        game.ai_data_mut().error_count = 2;
        game.state_mut().stats.score = 999;

        game.start();
        assert_eq!(*game.params(), GameParameters::DEFAULT);
        assert_eq!(*game.stats(), SessionStats::default());
        assert_eq!(game.ai_data().error_count, 0);
        assert!(game.ai_data().movement_patterns.is_empty());
        assert!(game.ai_data().adaptation_history.is_empty());
        assert!(game.state().obstacles.is_empty());
    }

    #[test]
    fn test_analysis_runs_after_interval() {
        let (mut game, log) = game();
        game.start();
        log.clear();

        // 2000 ms exactly is not enough: the interval must be exceeded
        for _ in 0..125 {
            game.update(InputState::default(), 16.0);
        }
        let analyses = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Status { .. } | GameEvent::Adaptation { .. }))
                .count()
        };
        assert_eq!(analyses(&log.events()), 0);

        game.update(InputState::default(), 1.0);
        assert_eq!(analyses(&log.events()), 1);
        assert_eq!(game.ai_data().last_analysis_ms, game.stats().game_time_ms);
    }

    #[test]
    fn test_final_analysis_verdicts() {
        let mut ai = AiData::new();
        ai.survival_time_ms = 30_000.0;
        ai.error_count = 3;

        let summary = FinalAnalysis::new(&ai, 500, 500, true);
        assert_eq!(summary.verdict, Verdict::Excellent);
        assert_eq!(summary.skill, SkillLevel::Advanced);
        assert!((summary.engagement_score - 55.0).abs() < 1e-9);
        assert!(summary.to_string().starts_with("FINAL ANALYSIS: 30.0s survival, 0 AI adaptations"));

        let summary = FinalAnalysis::new(&ai, 200, 500, false);
        assert_eq!(summary.verdict, Verdict::KeepPracticing);
    }

    #[test]
    fn test_skill_levels() {
        assert_eq!(SkillLevel::from_error_rate(0.0), SkillLevel::Advanced);
        assert_eq!(SkillLevel::from_error_rate(0.3), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_error_rate(0.59), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_error_rate(0.6), SkillLevel::Beginner);
    }
}

//! Adaptive Arcade entry point
//!
//! On the web this exposes a `WebArcade` handle that the page drives from
//! its animation frame loop. Natively it runs a headless session with the
//! demo autopilot and logs what the adaptation rules did.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use adaptive_arcade::ai::HttpAdvisor;
    use adaptive_arcade::platform::{FrameClock, InputState, LocalStore};
    use adaptive_arcade::sim::GamePhase;
    use adaptive_arcade::consts::TICK_MS;
    use adaptive_arcade::{EventLog, Game};

    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Game handle owned by the page script
    #[wasm_bindgen]
    pub struct WebArcade {
        game: Game,
        events: EventLog,
        clock: FrameClock,
        held: InputState,
    }

    #[wasm_bindgen]
    impl WebArcade {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebArcade {
            let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
            let events = EventLog::new();
            let mut game =
                Game::new(seed, Box::new(LocalStore)).with_listener(Box::new(events.clone()));

            if game.settings().advisor_enabled {
                let endpoint = game.settings().advisor_endpoint.clone();
                log::info!("Remote advisor enabled at {}", endpoint);
                game = game.with_advisor(Box::new(HttpAdvisor::new(endpoint)));
            }

            WebArcade {
                game,
                events,
                clock: FrameClock::new(),
                held: InputState::default(),
            }
        }

        /// Start (or restart) a session
        pub fn start(&mut self) {
            self.clock.reset();
            self.game.start();
        }

        /// Returns true when the game is now paused
        pub fn toggle_pause(&mut self) -> bool {
            let phase = self.game.toggle_pause();
            // Time spent paused must not be replayed on resume
            self.clock.reset();
            phase == GamePhase::Paused
        }

        /// Keys currently held down
        pub fn set_input(&mut self, move_left: bool, move_right: bool, jump: bool) {
            self.held = InputState {
                move_left,
                move_right,
                jump,
            };
        }

        /// Feed an animation frame timestamp; returns ticks simulated
        pub fn frame(&mut self, now_ms: f64) -> u32 {
            let ticks = self.clock.advance(now_ms);
            for _ in 0..ticks {
                self.game.update(self.held, TICK_MS);
            }
            ticks
        }

        /// "menu", "playing", "paused" or "gameOver"
        pub fn phase(&self) -> String {
            match self.game.phase() {
                GamePhase::Menu => "menu",
                GamePhase::Playing => "playing",
                GamePhase::Paused => "paused",
                GamePhase::GameOver => "gameOver",
            }
            .to_string()
        }

        pub fn high_score(&self) -> f64 {
            self.game.high_score() as f64
        }

        pub fn params_json(&self) -> Result<String, JsValue> {
            to_json(self.game.params())
        }

        pub fn stats_json(&self) -> Result<String, JsValue> {
            to_json(self.game.stats())
        }

        pub fn ai_data_json(&self) -> Result<String, JsValue> {
            to_json(self.game.ai_data())
        }

        /// Player, obstacles, collectibles and particles for drawing
        pub fn scene_json(&self) -> Result<String, JsValue> {
            let state = self.game.state();
            to_json(&serde_json::json!({
                "player": &state.player,
                "obstacles": &state.obstacles,
                "collectibles": &state.collectibles,
                "particles": &state.particles,
            }))
        }

        /// Events since the last call, oldest first
        pub fn drain_events_json(&self) -> Result<String, JsValue> {
            to_json(&self.events.take())
        }
    }

    impl Default for WebArcade {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }
        log::info!("Adaptive Arcade starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use adaptive_arcade::ai::LogAdvisor;
    use adaptive_arcade::consts::TICK_MS;
    use adaptive_arcade::events::LogListener;
    use adaptive_arcade::platform::FileStore;
    use adaptive_arcade::sim::GamePhase;
    use adaptive_arcade::Game;

    /// Ten minutes of play at 60 Hz
    const MAX_TICKS: u32 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Adaptive Arcade (native) starting headless autopilot run...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let save_path =
        std::env::var("ADAPTIVE_ARCADE_SAVE").unwrap_or_else(|_| "adaptive_arcade_save.json".into());

    let mut game = Game::new(seed, Box::new(FileStore::new(save_path)))
        .with_listener(Box::new(LogListener))
        .with_advisor(Box::new(LogAdvisor));
    game.start();

    let mut ticks = 0;
    while game.phase() == GamePhase::Playing && ticks < MAX_TICKS {
        let input = game.autopilot_input();
        game.update(input, TICK_MS);
        ticks += 1;
    }

    let stats = game.stats();
    log::info!(
        "Run ended after {} ticks: score {}, level {}, lives {}, high score {}",
        ticks,
        stats.score,
        stats.level,
        stats.lives,
        game.high_score()
    );
    match game.final_analysis() {
        Some(summary) => log::info!(
            "Skill {:?}, engagement {:.0}/100, {}",
            summary.skill,
            summary.engagement_score,
            summary.verdict.as_str()
        ),
        None => log::info!(
            "Autopilot survived the whole run ({} adaptations)",
            game.ai_data().adaptation_history.len()
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

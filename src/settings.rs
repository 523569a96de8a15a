//! Game settings and preferences
//!
//! Persisted separately from the high score, as JSON, in the same store.

use serde::{Deserialize, Serialize};

use crate::platform::storage::KeyValueStore;
use crate::sim::SimConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Adaptation ===
    /// Milliseconds of play between rule evaluations
    pub analysis_interval_ms: f64,

    // === Remote advisor ===
    /// Send metrics to the advisor endpoint after each adaptation
    pub advisor_enabled: bool,
    /// Advisor URL (relative URLs resolve against the page on web)
    pub advisor_endpoint: String,

    // === Visual Effects ===
    /// Particle bursts on collect/hit
    pub particles: bool,
    /// Cap on live particles
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_interval_ms: 2000.0,

            advisor_enabled: false,
            advisor_endpoint: "/api/ai-analyze".to_string(),

            particles: true,
            max_particles: 256,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "adaptive_arcade_settings";

    /// Simulation knobs derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            particles: self.particles,
            max_particles: self.max_particles,
        }
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        if !self.analysis_interval_ms.is_finite() || self.analysis_interval_ms <= 0.0 {
            self.analysis_interval_ms = Self::default().analysis_interval_ms;
        }
        self
    }
}

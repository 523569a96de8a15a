//! Adaptive difficulty
//!
//! - `metrics`: what the player is doing (survival, hits, movement)
//! - `rules`: priority-ordered parameter mutations plus the hit assist
//! - `advisor`: optional remote analysis, advisory only

pub mod advisor;
pub mod metrics;
pub mod rules;

pub use advisor::{Advisor, AdvisorError, AnalysisRequest, AnalysisResponse, LogAdvisor, NullAdvisor};
#[cfg(target_arch = "wasm32")]
pub use advisor::HttpAdvisor;
pub use metrics::{AdaptationRecord, AiData, MetricsSnapshot, MovementSample, MOVEMENT_WINDOW};
pub use rules::{Adaptation, AdaptationKind, Analysis, Roll, Rule, RuleEngine, assist};

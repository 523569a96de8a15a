//! Optional remote advisor
//!
//! After an adaptation the game may post its metrics to an analysis
//! endpoint. The reply is advisory: it is logged and never applied, and a
//! failure never reaches gameplay. Requests are fire-and-forget with no
//! retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::GameParameters;

/// Metrics posted to the advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Seconds survived this session
    pub survival_time: f64,
    /// Hits per second
    pub error_rate: f64,
    pub score: u64,
    pub current_params: GameParameters,
}

/// One suggested parameter change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub parameter: String,
    /// "increase", "decrease" or "modify"
    pub adjustment: String,
    pub value: f64,
    pub confidence: f64,
}

/// Successful analysis body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub player_skill_level: Option<String>,
    #[serde(default)]
    pub engagement_score: Option<f64>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    /// Rationale for the suggestions
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Wire envelope: `{ success, analysis }` or `{ success: false, error, fallback }`
#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    analysis: Option<AnalysisResponse>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor request failed: {0}")]
    Transport(String),
    #[error("advisor returned HTTP {0}")]
    Status(u16),
    #[error("advisor response is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("advisor rejected the request: {0}")]
    Rejected(String),
}

impl AnalysisResponse {
    /// Parse an advisor reply body
    pub fn from_json(body: &str) -> Result<Self, AdvisorError> {
        let envelope: Envelope = serde_json::from_str(body)?;
        match (envelope.success, envelope.analysis) {
            (true, Some(analysis)) => Ok(analysis),
            (true, None) => Err(AdvisorError::Rejected("missing analysis".into())),
            (false, _) => Err(AdvisorError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".into()),
            )),
        }
    }

    /// Suggestion with the highest confidence, if any
    pub fn strongest(&self) -> Option<&Suggestion> {
        self.suggestions
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

/// Log a reply (or its failure); nothing else happens with it
pub fn log_outcome(outcome: Result<AnalysisResponse, AdvisorError>) {
    match outcome {
        Ok(response) => match response.strongest() {
            Some(s) => log::info!(
                "Advisor suggests {} {} -> {:.3} (confidence {:.2}): {}",
                s.adjustment,
                s.parameter,
                s.value,
                s.confidence,
                response.reasoning
            ),
            None => log::info!("Advisor has no suggestions"),
        },
        Err(e) => log::warn!("Advisor not available, using local rule engine: {}", e),
    }
}

/// Receiver for metrics reports
pub trait Advisor {
    /// Send a report. Must not block and must not fail the caller.
    fn report(&mut self, request: AnalysisRequest);
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdvisor;

impl Advisor for NullAdvisor {
    fn report(&mut self, _request: AnalysisRequest) {}
}

/// Writes each report to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAdvisor;

impl Advisor for LogAdvisor {
    fn report(&mut self, request: AnalysisRequest) {
        match serde_json::to_string(&request) {
            Ok(json) => log::debug!("Advisor report: {}", json),
            Err(e) => log::warn!("Could not encode advisor report: {}", e),
        }
    }
}

/// Posts reports to an HTTP endpoint from the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HttpAdvisor {
    endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpAdvisor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(endpoint: String, body: String) -> Result<AnalysisResponse, AdvisorError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let js_err = |e: wasm_bindgen::JsValue| AdvisorError::Transport(format!("{:?}", e));

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&wasm_bindgen::JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&endpoint, &init).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let window = web_sys::window()
            .ok_or_else(|| AdvisorError::Transport("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;

        if !response.ok() {
            return Err(AdvisorError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?
            .as_string()
            .unwrap_or_default();
        AnalysisResponse::from_json(&text)
    }
}

#[cfg(target_arch = "wasm32")]
impl Advisor for HttpAdvisor {
    fn report(&mut self, request: AnalysisRequest) {
        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Could not encode advisor report: {}", e);
                return;
            }
        };
        let endpoint = self.endpoint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            log_outcome(Self::post(endpoint, body).await);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = AnalysisRequest {
            survival_time: 21.5,
            error_rate: 0.05,
            score: 120,
            current_params: GameParameters::DEFAULT,
        };
        let value: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["survivalTime"], 21.5);
        assert_eq!(value["errorRate"], 0.05);
        assert_eq!(value["score"], 120);
        assert_eq!(value["currentParams"]["jumpPower"], 12.0);
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "success": true,
            "analysis": {
                "playerSkillLevel": "advanced",
                "engagementScore": 40.5,
                "suggestions": [
                    {"parameter": "speed", "adjustment": "increase", "value": 2.5, "confidence": 0.85},
                    {"parameter": "gravity", "adjustment": "modify", "value": 0.7, "confidence": 0.6}
                ],
                "reasoning": "Player demonstrates high skill level.",
                "timestamp": "2024-01-01T00:00:00Z"
            }
        }"#;
        let response = AnalysisResponse::from_json(body).unwrap();
        assert_eq!(response.player_skill_level.as_deref(), Some("advanced"));
        assert_eq!(response.suggestions.len(), 2);
        assert_eq!(response.strongest().unwrap().parameter, "speed");
    }

    #[test]
    fn test_parse_minimal_success() {
        let response =
            AnalysisResponse::from_json(r#"{"success": true, "analysis": {}}"#).unwrap();
        assert!(response.suggestions.is_empty());
        assert!(response.strongest().is_none());
    }

    #[test]
    fn test_parse_failure_envelope() {
        let body = r#"{"success": false, "error": "AI analysis failed", "fallback": "Using local rule engine"}"#;
        match AnalysisResponse::from_json(body) {
            Err(AdvisorError::Rejected(msg)) => assert_eq!(msg, "AI analysis failed"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            AnalysisResponse::from_json("<html>502</html>"),
            Err(AdvisorError::Malformed(_))
        ));
    }

    #[test]
    fn test_log_outcome_never_panics() {
        log_outcome(Err(AdvisorError::Status(500)));
        log_outcome(Ok(AnalysisResponse::from_json(r#"{"success": true, "analysis": {}}"#).unwrap()));
    }
}

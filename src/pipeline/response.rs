// src/pipeline/response.rs

use super::predictor::PredictionResult;
use crate::error::PredictionError;
use crate::scoring::round_to;
use serde::{Deserialize, Serialize};

/// Wire shape of one answer: `{"gap", "score", "radar"}` or `{"error"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Success { gap: f64, score: f64, radar: [f64; 4] },
    Failure { error: String },
}

impl From<&PredictionResult> for PredictionResponse {
    fn from(r: &PredictionResult) -> Self {
        // Reported gap is rounded; the radar keeps full precision.
        PredictionResponse::Success {
            gap: round_to(r.gap, 3),
            score: r.score,
            radar: r.radar.as_array(),
        }
    }
}

impl From<&PredictionError> for PredictionResponse {
    fn from(e: &PredictionError) -> Self {
        PredictionResponse::Failure { error: e.to_string() }
    }
}

impl From<Result<PredictionResult, PredictionError>> for PredictionResponse {
    fn from(r: Result<PredictionResult, PredictionError>) -> Self {
        match &r {
            Ok(result) => result.into(),
            Err(e) => e.into(),
        }
    }
}

impl PredictionResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResponse::Success { .. })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

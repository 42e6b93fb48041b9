//! Wire format for predictions

use crate::engine::{Analysis, Prediction, RankedResult};
use serde::{Deserialize, Serialize};

/// Error text for the no-match outcome
pub const NO_MATCH_MESSAGE: &str = "no symptoms matched";

/// A disease entry as sent to clients, with confidence as a percentage string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub disease: String,
    pub confidence: String,
    pub description: String,
    pub recommendations: Vec<String>,
    pub severity: String,
}

impl From<RankedResult> for PredictionEntry {
    fn from(result: RankedResult) -> Self {
        Self {
            confidence: result.confidence_label(),
            disease: result.disease,
            description: result.description,
            recommendations: result.recommendations,
            severity: result.severity,
        }
    }
}

/// Either `{"error": ...}` or `{"predictions": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Predictions {
        predictions: Vec<PredictionEntry>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ignored: Vec<String>,
    },
    NoMatch {
        error: String,
    },
}

impl PredictionResponse {
    pub fn no_match() -> Self {
        PredictionResponse::NoMatch {
            error: NO_MATCH_MESSAGE.to_string(),
        }
    }
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        match prediction {
            Prediction::NoMatch => Self::no_match(),
            Prediction::Ranked(results) => PredictionResponse::Predictions {
                predictions: results.into_iter().map(PredictionEntry::from).collect(),
                ignored: Vec::new(),
            },
        }
    }
}

impl From<Analysis> for PredictionResponse {
    fn from(analysis: Analysis) -> Self {
        match analysis.prediction {
            Prediction::NoMatch => Self::no_match(),
            Prediction::Ranked(results) => PredictionResponse::Predictions {
                predictions: results.into_iter().map(PredictionEntry::from).collect(),
                ignored: analysis.ignored,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_match_body() {
        let body = serde_json::to_value(PredictionResponse::from(Prediction::NoMatch)).unwrap();
        assert_eq!(body, json!({ "error": "no symptoms matched" }));
    }

    #[test]
    fn test_predictions_body() {
        let prediction = Prediction::Ranked(vec![RankedResult {
            disease: "flu".to_string(),
            confidence: 66.67,
            description: "Match based on symptoms: flu.".to_string(),
            recommendations: vec!["Consult a doctor.".to_string()],
            severity: "Varies".to_string(),
        }]);
        let body = serde_json::to_value(PredictionResponse::from(prediction)).unwrap();
        assert_eq!(
            body,
            json!({
                "predictions": [{
                    "disease": "flu",
                    "confidence": "66.67%",
                    "description": "Match based on symptoms: flu.",
                    "recommendations": ["Consult a doctor."],
                    "severity": "Varies"
                }]
            })
        );
    }

    #[test]
    fn test_empty_ranking_is_not_no_match() {
        let body = serde_json::to_value(PredictionResponse::from(Prediction::Ranked(vec![]))).unwrap();
        assert_eq!(body, json!({ "predictions": [] }));
    }

    #[test]
    fn test_ignored_listed_for_analysis() {
        let analysis = Analysis {
            prediction: Prediction::Ranked(vec![]),
            recognized: vec!["fever".to_string()],
            ignored: vec!["unicorn_itch".to_string()],
        };
        let body = serde_json::to_value(PredictionResponse::from(analysis)).unwrap();
        assert_eq!(body["ignored"], json!(["unicorn_itch"]));
    }
}

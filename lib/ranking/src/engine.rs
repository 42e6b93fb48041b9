//! Symptom checker engine
//!
//! Bundles the vocabulary, label encoding and neighbor index loaded at
//! startup. The engine is immutable after construction and is shared across
//! concurrent queries through `Arc` without locking.

use crate::confidence::format_confidence;
use crate::content::{ContentProvider, StaticContent};
use crate::encoder::{EncodeReport, SymptomEncoder};
use crate::rank::{Candidate, Ranker, RankerConfig};
use serde::Serialize;
use std::sync::Arc;
use symptomx_core::{Error, LabelEncoding, NeighborIndex, Result, SymptomVector, SymptomVocabulary};
use tracing::debug;

/// One disease in a prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub disease: String,
    pub confidence: f64,
    pub description: String,
    pub recommendations: Vec<String>,
    pub severity: String,
}

impl RankedResult {
    /// Confidence rendered as a percentage string
    pub fn confidence_label(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// Outcome of a prediction
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// No input symptom matched the vocabulary; the index was not queried
    NoMatch,
    /// Up to `max_results` diseases, confidence descending, labels unique
    Ranked(Vec<RankedResult>),
}

impl Prediction {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Prediction::NoMatch)
    }

    /// Ranked entries, empty for [`Prediction::NoMatch`]
    pub fn results(&self) -> &[RankedResult] {
        match self {
            Prediction::NoMatch => &[],
            Prediction::Ranked(results) => results,
        }
    }
}

/// Prediction together with how the input labels were matched
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub prediction: Prediction,
    pub recognized: Vec<String>,
    pub ignored: Vec<String>,
}

/// Encoder, neighbor index and ranker over one trained model
pub struct SymptomChecker {
    encoder: SymptomEncoder,
    labels: LabelEncoding,
    index: Box<dyn NeighborIndex>,
    ranker: Ranker,
    content: Box<dyn ContentProvider>,
}

impl SymptomChecker {
    /// Assemble an engine. The index dimension must equal the vocabulary size.
    pub fn new(
        vocabulary: SymptomVocabulary,
        labels: LabelEncoding,
        index: Box<dyn NeighborIndex>,
        config: RankerConfig,
    ) -> Result<Self> {
        if index.dim() != vocabulary.len() {
            return Err(Error::InvalidDimension {
                expected: vocabulary.len(),
                actual: index.dim(),
            });
        }

        Ok(Self {
            encoder: SymptomEncoder::new(Arc::new(vocabulary)),
            labels,
            index,
            ranker: Ranker::new(config)?,
            content: Box::new(StaticContent),
        })
    }

    /// Replace the presentation content source
    #[must_use]
    pub fn with_content(mut self, content: Box<dyn ContentProvider>) -> Self {
        self.content = content;
        self
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        self.encoder.vocabulary()
    }

    pub fn labels(&self) -> &LabelEncoding {
        &self.labels
    }

    pub fn config(&self) -> &RankerConfig {
        self.ranker.config()
    }

    /// Number of stored training rows
    pub fn training_rows(&self) -> usize {
        self.index.len()
    }

    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> SymptomVector {
        self.encoder.encode(symptoms)
    }

    /// Rank diseases for a symptom list
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Prediction> {
        self.predict_vector(&self.encoder.encode(symptoms))
    }

    /// Rank diseases and report which labels were recognized
    pub fn analyze<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Analysis> {
        let EncodeReport {
            vector,
            recognized,
            ignored,
        } = self.encoder.encode_report(symptoms);
        debug!(recognized = ?recognized, ignored = ?ignored, "Encoded symptoms");

        Ok(Analysis {
            prediction: self.predict_vector(&vector)?,
            recognized,
            ignored,
        })
    }

    /// Rank diseases for an already-encoded vector
    pub fn predict_vector(&self, vector: &SymptomVector) -> Result<Prediction> {
        if vector.is_zero() {
            debug!("No recognized symptom, skipping neighbor query");
            return Ok(Prediction::NoMatch);
        }

        let neighbors = self.index.kneighbors(vector, self.ranker.config().neighbors)?;
        let candidates = neighbors
            .iter()
            .map(|n| -> Result<Candidate> {
                Ok(Candidate::new(self.labels.decode(n.class_id)?, n.distance))
            })
            .collect::<Result<Vec<_>>>()?;

        let results = self
            .ranker
            .rank(candidates)?
            .into_iter()
            .map(|scored| {
                let content = self.content.content_for(&scored.disease);
                RankedResult {
                    disease: scored.disease,
                    confidence: scored.confidence,
                    description: content.description,
                    recommendations: content.recommendations,
                    severity: content.severity,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            active = vector.active_count(),
            neighbors = neighbors.len(),
            results = results.len(),
            "Ranked prediction"
        );
        Ok(Prediction::Ranked(results))
    }
}

impl std::fmt::Debug for SymptomChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymptomChecker")
            .field("vocabulary", &self.vocabulary().len())
            .field("labels", &self.labels.len())
            .field("training_rows", &self.index.len())
            .field("config", self.ranker.config())
            .finish()
    }
}

//! Symptom Encoder
//!
//! Maps a list of symptom labels to a multi-hot [`SymptomVector`] over the
//! vocabulary. Labels are matched under [`normalize_label`]; unknown labels
//! contribute no bit and are never an error.

use std::sync::Arc;
use symptomx_core::{SymptomVector, SymptomVocabulary};

/// Result of encoding with the per-label match outcome
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeReport {
    pub vector: SymptomVector,
    /// Input labels that matched a vocabulary entry, in input order
    pub recognized: Vec<String>,
    /// Input labels that matched nothing, in input order
    pub ignored: Vec<String>,
}

/// Encoder from symptom labels to multi-hot vectors
#[derive(Debug, Clone)]
pub struct SymptomEncoder {
    vocabulary: Arc<SymptomVocabulary>,
}

impl SymptomEncoder {
    pub fn new(vocabulary: Arc<SymptomVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    /// Vector dimension, equal to the vocabulary size
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Encode a symptom list. Order and duplicates do not affect the result.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> SymptomVector {
        SymptomVector::from_indices(
            self.dim(),
            symptoms
                .iter()
                .filter_map(|s| self.vocabulary.position(s.as_ref())),
        )
    }

    /// Encode and report which inputs were recognized
    pub fn encode_report<S: AsRef<str>>(&self, symptoms: &[S]) -> EncodeReport {
        let mut vector = SymptomVector::zeros(self.dim());
        let mut recognized = Vec::new();
        let mut ignored = Vec::new();

        for symptom in symptoms {
            let symptom = symptom.as_ref();
            match self.vocabulary.position(symptom) {
                Some(idx) => {
                    vector.set(idx);
                    recognized.push(symptom.to_string());
                }
                None => ignored.push(symptom.to_string()),
            }
        }

        EncodeReport {
            vector,
            recognized,
            ignored,
        }
    }
}

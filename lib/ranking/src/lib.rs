//! # SymptomX Ranking
//!
//! Turns a list of symptom labels into a ranked list of candidate diseases.
//!
//! ## Example
//!
//! ```rust
//! use symptomx_core::{BruteForceIndex, LabelEncoding, Metric, SymptomVector, SymptomVocabulary};
//! use symptomx_ranking::{Prediction, RankerConfig, SymptomChecker};
//!
//! let vocabulary = SymptomVocabulary::new(["fever", "cough", "headache"]).unwrap();
//! let labels = LabelEncoding::new(["flu", "cold"]).unwrap();
//! let index = BruteForceIndex::from_rows(
//!     3,
//!     Metric::Euclidean,
//!     vec![
//!         (SymptomVector::from_indices(3, [0, 1]), 0),
//!         (SymptomVector::from_indices(3, [1]), 1),
//!     ],
//! )
//! .unwrap();
//!
//! let checker = SymptomChecker::new(vocabulary, labels, Box::new(index), RankerConfig::default()).unwrap();
//!
//! let prediction = checker.predict(&["Fever", "cough"]).unwrap();
//! assert_eq!(prediction.results()[0].disease, "flu");
//! assert_eq!(checker.predict(&["unicorn_itch"]).unwrap(), Prediction::NoMatch);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Symptoms   │────>│   Encoder   │────>│  Neighbor   │
//! │  (labels)   │     │ (multi-hot) │     │   Index     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   Ranker    │<──────────┘
//!                      │ (dedup/sort)│
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │  Content    │
//!                      │  (results)  │
//!                      └─────────────┘
//! ```

pub mod encoder;
pub mod confidence;
pub mod rank;
pub mod content;
pub mod engine;
pub mod response;

pub use encoder::{EncodeReport, SymptomEncoder};
pub use confidence::{confidence, format_confidence, raw_confidence};
pub use rank::{Candidate, Ranker, RankerConfig, ScoredCandidate, DEFAULT_MAX_RESULTS, DEFAULT_NEIGHBORS};
pub use content::{CatalogContent, ContentEntry, ContentProvider, DiseaseContent, StaticContent};
pub use engine::{Analysis, Prediction, RankedResult, SymptomChecker};
pub use response::{PredictionEntry, PredictionResponse, NO_MATCH_MESSAGE};

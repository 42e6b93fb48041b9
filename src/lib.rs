//! # SymptomX
//!
//! A symptom checker: submit a set of symptom labels, get back a ranked list
//! of candidate diseases.
//!
//! Symptoms are encoded as a multi-hot vector over a fixed vocabulary, the
//! nearest training vectors are looked up in a pre-built index, distances
//! become confidences via `100 / (1 + d)`, and the hits are deduplicated by
//! disease (nearest occurrence wins), sorted and cut to the top five.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! symptomx --model-dir ./model --http-port 8000
//! curl -X POST localhost:8000/predict -H 'content-type: application/json' \
//!      -d '{"symptoms": ["fever", "cough"]}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use symptomx::prelude::*;
//!
//! let checker = ArtifactStore::new("./model")
//!     .load()
//!     .and_then(|artifacts| artifacts.into_checker(RankerConfig::default()))
//!     .unwrap();
//!
//! match checker.predict(&["fever", "cough"]).unwrap() {
//!     Prediction::NoMatch => println!("no symptoms matched"),
//!     Prediction::Ranked(results) => {
//!         for r in results {
//!             println!("{} {}", r.disease, r.confidence_label());
//!         }
//!     }
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `symptomx-core` - Vocabulary, multi-hot vectors, label encoding, neighbor index
//! - `symptomx-ranking` - Encoder, confidence transform, ranker, engine
//! - `symptomx-storage` - Model artifacts on disk
//! - `symptomx-api` - REST API

// Re-export core types
pub use symptomx_core::{
    BruteForceIndex, LabelEncoding, Metric, Neighbor, NeighborIndex, SymptomVector,
    SymptomVocabulary, Error, Result,
};

// Re-export ranking
pub use symptomx_ranking::{
    Analysis, CatalogContent, ContentProvider, Prediction, PredictionResponse, RankedResult,
    RankerConfig, SymptomChecker, SymptomEncoder,
};

// Re-export storage
pub use symptomx_storage::{ArtifactStore, ModelArtifacts, StorageError};

// Re-export API
pub use symptomx_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        SymptomVocabulary, SymptomVector, LabelEncoding, Metric,
        NeighborIndex, BruteForceIndex,
        SymptomChecker, RankerConfig, Prediction, RankedResult,
        ArtifactStore, StorageError,
        Error, Result,
    };
}

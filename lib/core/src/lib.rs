//! # SymptomX Core
//!
//! Core data structures for the SymptomX symptom checker.
//!
//! - [`SymptomVocabulary`] - Ordered set of recognized symptom labels
//! - [`SymptomVector`] - Multi-hot encoding of a symptom set
//! - [`LabelEncoding`] - Disease label to class id mapping
//! - [`NeighborIndex`] - k-nearest-neighbor lookup over training vectors
//! - [`BruteForceIndex`] - Exact neighbor index
//!
//! ## Example
//!
//! ```rust
//! use symptomx_core::{BruteForceIndex, Metric, NeighborIndex, SymptomVector, SymptomVocabulary};
//!
//! let vocab = SymptomVocabulary::new(["fever", "cough", "headache"]).unwrap();
//! let index = BruteForceIndex::from_rows(
//!     vocab.len(),
//!     Metric::Euclidean,
//!     vec![(SymptomVector::from_indices(3, [0, 1]), 0)],
//! )
//! .unwrap();
//!
//! let query = SymptomVector::from_indices(3, [0, 1]);
//! let hits = index.kneighbors(&query, 15).unwrap();
//! assert_eq!(hits[0].distance, 0.0);
//! ```

pub mod error;
pub mod vector;
pub mod vocabulary;
pub mod labels;
pub mod metric;
pub mod index;

pub use error::{Error, Result};
pub use vector::SymptomVector;
pub use vocabulary::{normalize_label, SymptomVocabulary};
pub use labels::LabelEncoding;
pub use metric::Metric;
pub use index::{BruteForceIndex, Neighbor, NeighborIndex};

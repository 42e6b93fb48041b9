//! # SymptomX Storage
//!
//! Persisted model artifacts for SymptomX: symptom vocabulary, disease label
//! encoding, neighbor index and optional content catalog, with a checksummed
//! manifest. Loading is all-or-nothing; any failure is fatal at startup.

pub mod error;
pub mod manifest;
pub mod artifacts;

pub use error::{Result, StorageError};
pub use manifest::{checksum, Manifest, FORMAT_VERSION};
pub use artifacts::{ArtifactStore, IndexData, ModelArtifacts};

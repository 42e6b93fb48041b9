// Manifest describing a saved model directory
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use symptomx_core::Metric;

/// Current artifact layout version
pub const FORMAT_VERSION: u32 = 1;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const LABELS_FILE: &str = "labels.json";
pub const INDEX_FILE: &str = "index.bin";
pub const CONTENT_FILE: &str = "content.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    /// RFC 3339 timestamp of the save
    pub created_at: String,
    pub metric: Metric,
    pub vocabulary_size: usize,
    pub training_rows: usize,
    pub classes: usize,
    /// SHA-256 hex digest per artifact file name
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(metric: Metric, vocabulary_size: usize, training_rows: usize, classes: usize) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            metric,
            vocabulary_size,
            training_rows,
            classes,
            files: BTreeMap::new(),
        }
    }

    /// Record the checksum of an artifact's bytes
    pub fn record(&mut self, file: &str, data: &[u8]) {
        self.files.insert(file.to_string(), checksum(data));
    }

    #[inline]
    pub fn lists(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }
}

/// Lowercase hex SHA-256
pub fn checksum(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

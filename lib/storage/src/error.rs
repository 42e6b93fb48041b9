use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures loading or saving model artifacts. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Missing artifact: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid index data in {}: {source}", .path.display())]
    Bincode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Unsupported artifact format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Artifact {0} is not listed in the manifest")]
    Unlisted(String),

    #[error("Checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("Inconsistent model artifacts: {0}")]
    Inconsistent(String),

    #[error("Invalid model: {0}")]
    Model(#[from] symptomx_core::Error),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Empty vocabulary")]
    EmptyVocabulary,

    #[error("Duplicate symptom label: {label:?} collides with {existing:?}")]
    DuplicateSymptom { label: String, existing: String },

    #[error("Invalid symptom label: {0:?}")]
    InvalidSymptom(String),

    #[error("Duplicate disease label: {0}")]
    DuplicateLabel(String),

    #[error("Unknown class id: {0}")]
    UnknownClass(u32),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

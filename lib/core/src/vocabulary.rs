use ahash::AHashMap;
use crate::{Error, Result};

/// Normalize a symptom label for matching.
///
/// Trims, lowercases, and collapses every run of whitespace, `-` or `_`
/// into a single `_`, with no leading or trailing `_`.
/// `"  Skin Rash "`, `"skin-rash"` and `"SKIN__RASH"` all become `"skin_rash"`.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;

    for c in label.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }

    out
}

/// Ordered set of the symptom labels the encoder recognizes.
///
/// Position in the vocabulary is the position of the label's bit in a
/// [`SymptomVector`](crate::SymptomVector). Fixed at construction.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    labels: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Build a vocabulary from labels in vector order.
    ///
    /// Fails on an empty list, on a label that normalizes to nothing, and on
    /// two labels that normalize to the same key.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut positions: AHashMap<String, usize> = AHashMap::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            let key = normalize_label(label);
            if key.is_empty() {
                return Err(Error::InvalidSymptom(label.clone()));
            }
            if let Some(&existing) = positions.get(&key) {
                return Err(Error::DuplicateSymptom {
                    label: label.clone(),
                    existing: labels[existing].clone(),
                });
            }
            positions.insert(key, idx);
        }

        Ok(Self { labels, positions })
    }

    /// Number of labels, which is also the vector dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of a label under the normalization rule
    #[inline]
    pub fn position(&self, label: &str) -> Option<usize> {
        let key = normalize_label(label);
        if key.is_empty() {
            return None;
        }
        self.positions.get(&key).copied()
    }

    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Label at a vector position, as it was given at construction
    #[inline]
    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Labels in vector order
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

use serde::{Deserialize, Serialize};

/// Multi-hot encoding of a symptom set over a vocabulary.
///
/// One slot per vocabulary label, each either `0.0` or `1.0`. The all-zero
/// vector is valid and means no recognized symptom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomVector {
    data: Vec<f32>,
}

impl SymptomVector {
    /// All-zero vector of the given dimension
    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    /// Build a vector with the given positions set. Out-of-range positions are ignored.
    #[must_use]
    pub fn from_indices(dim: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut vector = Self::zeros(dim);
        for idx in indices {
            vector.set(idx);
        }
        vector
    }

    /// Set the bit at `idx`. Returns false if `idx` is out of range.
    #[inline]
    pub fn set(&mut self, idx: usize) -> bool {
        match self.data.get_mut(idx) {
            Some(slot) => {
                *slot = 1.0;
                true
            }
            None => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Number of bits set
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.data.iter().filter(|v| **v != 0.0).count()
    }

    /// True when no bit is set, including the zero-dimension case
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

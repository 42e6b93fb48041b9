use crate::{Error, Metric, Result, SymptomVector};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::BinaryHeap;

/// Training rows above which distance computation is spread over the rayon pool
const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// One neighbor hit: a stored training row, its class and its distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub class_id: u32,
    pub distance: f64,
}

/// k-nearest-neighbor lookup over a fixed set of labelled training vectors.
///
/// Implementations are read-only at query time and must return hits
/// nearest-first. When `k` exceeds the number of stored rows, every row is
/// returned.
pub trait NeighborIndex: Send + Sync {
    /// Dimension of the stored vectors
    fn dim(&self) -> usize;

    /// Number of stored training rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kneighbors(&self, query: &SymptomVector, k: usize) -> Result<Vec<Neighbor>>;
}

/// Exact nearest-neighbor index scanning every training row.
///
/// Vectors are kept in one contiguous row-major buffer. Ties on distance are
/// broken by training row, lowest first, so results are deterministic.
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    dim: usize,
    metric: Metric,
    vectors: Vec<f32>,
    classes: Vec<u32>,
}

impl BruteForceIndex {
    pub fn new(dim: usize, metric: Metric, vectors: Vec<f32>, classes: Vec<u32>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidIndex("dimension must be positive".to_string()));
        }
        let expected = dim.checked_mul(classes.len()).ok_or_else(|| {
            Error::InvalidIndex(format!(
                "{} rows of dimension {} overflow the value buffer",
                classes.len(),
                dim
            ))
        })?;
        if vectors.len() != expected {
            return Err(Error::InvalidIndex(format!(
                "{} values cannot hold {} rows of dimension {}",
                vectors.len(),
                classes.len(),
                dim
            )));
        }
        if let Some(pos) = vectors.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidIndex(format!(
                "non-finite value in row {}",
                pos / dim
            )));
        }

        Ok(Self {
            dim,
            metric,
            vectors,
            classes,
        })
    }

    /// Build an index from `(vector, class id)` rows
    pub fn from_rows<I>(dim: usize, metric: Metric, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SymptomVector, u32)>,
    {
        let mut vectors = Vec::new();
        let mut classes = Vec::new();
        for (vector, class_id) in rows {
            if vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
            vectors.extend_from_slice(vector.as_slice());
            classes.push(class_id);
        }
        Self::new(dim, metric, vectors, classes)
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Row-major training vectors
    #[inline]
    pub fn vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// Class id of each training row
    #[inline]
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Largest class id referenced by a training row
    pub fn max_class(&self) -> Option<u32> {
        self.classes.iter().copied().max()
    }

    #[inline]
    fn row(&self, idx: usize) -> &[f32] {
        let start = idx * self.dim;
        &self.vectors[start..start + self.dim]
    }

    fn distances(&self, query: &[f32]) -> Vec<f64> {
        let metric = self.metric;
        if self.classes.len() >= PARALLEL_SCAN_THRESHOLD {
            self.vectors
                .par_chunks_exact(self.dim)
                .map(|row| metric.distance(query, row))
                .collect()
        } else {
            (0..self.classes.len())
                .map(|i| metric.distance(query, self.row(i)))
                .collect()
        }
    }
}

impl NeighborIndex for BruteForceIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.classes.len()
    }

    fn kneighbors(&self, query: &SymptomVector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        let k = k.min(self.classes.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let distances = self.distances(query.as_slice());

        // max-heap of the k best so far; the worst kept hit sits on top
        let mut heap: BinaryHeap<(OrderedFloat<f64>, usize)> = BinaryHeap::with_capacity(k + 1);
        for (row, distance) in distances.into_iter().enumerate() {
            if !distance.is_finite() || distance < 0.0 {
                return Err(Error::Computation(format!(
                    "invalid distance {} for training row {}",
                    distance, row
                )));
            }
            heap.push((OrderedFloat(distance), row));
            if heap.len() > k {
                heap.pop();
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, row)| Neighbor {
                row,
                class_id: self.classes[row],
                distance: distance.into_inner(),
            })
            .collect())
    }
}

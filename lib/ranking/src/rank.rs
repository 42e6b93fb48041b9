//! Ranker for neighbor hits
//!
//! Turns nearest-first neighbor hits into a deduplicated, confidence-ordered,
//! truncated candidate list.

use crate::confidence::confidence;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use symptomx_core::{Error, Result};

/// Default number of neighbors requested from the index
pub const DEFAULT_NEIGHBORS: usize = 15;

/// Default number of diseases returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Ranking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// k for the neighbor query
    pub neighbors: usize,
    /// Maximum entries in a result
    pub max_results: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbors == 0 {
            return Err(Error::InvalidConfig("neighbors must be at least 1".to_string()));
        }
        if self.max_results == 0 {
            return Err(Error::InvalidConfig("max_results must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// One neighbor hit resolved to its disease label, before dedup
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub disease: String,
    pub distance: f64,
}

impl Candidate {
    pub fn new(disease: impl Into<String>, distance: f64) -> Self {
        Self {
            disease: disease.into(),
            distance,
        }
    }
}

/// A retained candidate with its confidence
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub disease: String,
    pub distance: f64,
    pub confidence: f64,
}

/// Dedup, sort and truncate neighbor hits
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank candidates given in neighbor order.
    ///
    /// The first occurrence of each disease is kept and later ones are
    /// dropped, not merged. The survivors are stable-sorted by confidence
    /// descending, so ties keep neighbor order, then cut to `max_results`.
    pub fn rank(&self, candidates: Vec<Candidate>) -> Result<Vec<ScoredCandidate>> {
        let mut seen: AHashSet<String> = AHashSet::with_capacity(candidates.len());
        let mut scored = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if !candidate.distance.is_finite() || candidate.distance < 0.0 {
                return Err(Error::Computation(format!(
                    "invalid distance {} for {:?}",
                    candidate.distance, candidate.disease
                )));
            }
            if !seen.insert(candidate.disease.clone()) {
                continue;
            }
            scored.push(ScoredCandidate {
                confidence: confidence(candidate.distance),
                disease: candidate.disease,
                distance: candidate.distance,
            });
        }

        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scored.truncate(self.config.max_results);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> Ranker {
        Ranker::new(RankerConfig::default()).unwrap()
    }

    fn diseases(scored: &[ScoredCandidate]) -> Vec<&str> {
        scored.iter().map(|s| s.disease.as_str()).collect()
    }

    #[test]
    fn test_first_seen_wins() {
        let ranked = ranker()
            .rank(vec![
                Candidate::new("flu", 0.0),
                Candidate::new("flu", 0.5),
                Candidate::new("cold", 1.0),
            ])
            .unwrap();

        assert_eq!(diseases(&ranked), vec!["flu", "cold"]);
        assert_eq!(ranked[0].confidence, 100.0);
        assert_eq!(ranked[1].confidence, 50.0);
    }

    #[test]
    fn test_duplicate_is_not_merged_even_when_closer() {
        // an out-of-order duplicate is still discarded
        let ranked = ranker()
            .rank(vec![Candidate::new("flu", 2.0), Candidate::new("flu", 0.0)])
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].distance, 2.0);
    }

    #[test]
    fn test_ties_keep_neighbor_order() {
        let ranked = ranker()
            .rank(vec![
                Candidate::new("b", 1.0),
                Candidate::new("a", 1.0),
                Candidate::new("c", 1.0000001),
            ])
            .unwrap();
        assert_eq!(diseases(&ranked), vec!["b", "a", "c"]);
        assert!(ranked.iter().all(|s| s.confidence == 50.0));
    }

    #[test]
    fn test_truncates_to_max_results() {
        let candidates = (0..15)
            .map(|i| Candidate::new(format!("d{}", i), i as f64))
            .collect();
        let ranked = ranker().rank(candidates).unwrap();
        assert_eq!(diseases(&ranked), vec!["d0", "d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn test_no_padding() {
        let candidates = (0..15)
            .map(|i| Candidate::new(format!("d{}", i % 3), 1.0 + i as f64))
            .collect();
        let ranked = ranker().rank(candidates).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_sort_reorders_out_of_order_input() {
        let ranked = ranker()
            .rank(vec![Candidate::new("far", 3.0), Candidate::new("near", 0.0)])
            .unwrap();
        assert_eq!(diseases(&ranked), vec!["near", "far"]);
    }

    #[test]
    fn test_invalid_distance_is_an_error() {
        assert!(matches!(
            ranker().rank(vec![Candidate::new("flu", -1.0)]),
            Err(Error::Computation(_))
        ));
        assert!(matches!(
            ranker().rank(vec![Candidate::new("flu", f64::NAN)]),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(Ranker::new(RankerConfig { neighbors: 0, max_results: 5 }).is_err());
        assert!(Ranker::new(RankerConfig { neighbors: 15, max_results: 0 }).is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: RankerConfig = serde_json::from_str(r#"{"neighbors": 30}"#).unwrap();
        assert_eq!(config.neighbors, 30);
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(
            serde_json::to_value(RankerConfig::default()).unwrap(),
            serde_json::json!({ "neighbors": 15, "max_results": 5 })
        );
    }
}

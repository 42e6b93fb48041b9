use serde::{Deserialize, Serialize};

/// Distance metric used by the neighbor index.
///
/// Every variant returns a non-negative distance where `0.0` means identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Minkowski p=2
    #[default]
    Euclidean,
    /// Minkowski p=1; on multi-hot vectors this is the Hamming distance
    Manhattan,
    /// `1 - cos(a, b)`, with zero-norm vectors treated as orthogonal
    Cosine,
}

impl Metric {
    /// Distance between two equal-length slices
    #[inline]
    pub fn distance(self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Euclidean => squared_l2(a, b).sqrt(),
            Metric::Manhattan => a
                .iter()
                .zip(b)
                .map(|(x, y)| (f64::from(*x) - f64::from(*y)).abs())
                .sum(),
            Metric::Cosine => {
                let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
                for (x, y) in a.iter().zip(b) {
                    let (x, y) = (f64::from(*x), f64::from(*y));
                    dot += x * y;
                    na += x * x;
                    nb += y * y;
                }
                if na == 0.0 || nb == 0.0 {
                    return 1.0;
                }
                // rounding can push cos slightly past 1
                (1.0 - dot / (na.sqrt() * nb.sqrt())).max(0.0)
            }
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Metric {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" | "Euclidean" | "l2" => Ok(Metric::Euclidean),
            "manhattan" | "Manhattan" | "l1" => Ok(Metric::Manhattan),
            "cosine" | "Cosine" => Ok(Metric::Cosine),
            other => Err(crate::Error::InvalidConfig(format!("unknown metric: {}", other))),
        }
    }
}

#[inline]
fn squared_l2(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        let d = Metric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(Metric::Euclidean.distance(&[1.0, 1.0, 0.0], &[1.0, 1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_manhattan_counts_differing_bits() {
        assert_eq!(Metric::Manhattan.distance(&[1.0, 1.0, 0.0], &[0.0, 1.0, 1.0]), 2.0);
    }

    #[test]
    fn test_cosine() {
        assert!(Metric::Cosine.distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-12);
        assert!((Metric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(Metric::Cosine.distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("l2".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!(Metric::Manhattan.to_string().parse::<Metric>().unwrap(), Metric::Manhattan);
        assert!("hamming".parse::<Metric>().is_err());
    }
}

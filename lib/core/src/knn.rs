use crate::{Error, Result, Vector};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Floor applied to a neighbor's distance before inverse-distance
/// weighting. A distance of exactly zero (an exact match) would divide by
/// zero; clamping to the floor gives the exact match a weight of 1e6, so
/// it dominates the vote without crashing it.
pub const DISTANCE_FLOOR: f32 = 1e-6;

/// One entry of a neighborhood query result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub distance: f32,
    pub index: usize,
}

/// Exact brute-force k-nearest-neighbor index.
///
/// The reference corpus is small (hundreds of records), so an exact linear
/// scan beats an approximate index and keeps results fully reproducible:
/// neighbors come back in ascending distance order with ties broken by
/// ascending record index.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    vectors: Vec<Vector>,
    dim: usize,
}

impl NearestNeighbors {
    /// Build an index over the corpus vectors.
    ///
    /// All vectors must share one dimension; an empty corpus is an
    /// `InvalidConfig` error since no query could ever be answered.
    pub fn fit(vectors: Vec<Vector>) -> Result<Self> {
        let Some(first) = vectors.first() else {
            return Err(Error::InvalidConfig(
                "cannot index an empty corpus".to_string(),
            ));
        };
        let dim = first.dim();
        for vector in &vectors {
            if vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
        }
        Ok(Self { vectors, dim })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Find the `k` nearest corpus vectors to `query`.
    ///
    /// Fails loudly when `k` exceeds the corpus size instead of silently
    /// truncating, so callers never mistake a short list for a complete
    /// neighborhood.
    pub fn neighbors(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        if k > self.vectors.len() {
            return Err(Error::NeighborhoodTooLarge {
                requested: k,
                available: self.vectors.len(),
            });
        }

        let mut scored: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| Neighbor {
                distance: query.l2_distance(vector),
                index,
            })
            .collect();

        scored.sort_unstable_by_key(|n| (OrderedFloat(n.distance), n.index));
        scored.truncate(k);
        Ok(scored)
    }
}

/// Inverse-distance-weighted k-NN multi-label classifier.
///
/// Each label position is voted independently: every neighbor contributes
/// `1 / max(distance, DISTANCE_FLOOR)` to its label value at that
/// position, and the value with the highest total weight wins. Ties go to
/// the smaller label value for reproducibility.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    index: NearestNeighbors,
    labels: Vec<Vec<u32>>,
    k: usize,
}

impl KnnClassifier {
    pub fn fit(vectors: Vec<Vector>, labels: Vec<Vec<u32>>, k: usize) -> Result<Self> {
        if vectors.len() != labels.len() {
            return Err(Error::InvalidConfig(format!(
                "label count {} does not match vector count {}",
                labels.len(),
                vectors.len()
            )));
        }
        if k == 0 || k > vectors.len() {
            return Err(Error::NeighborhoodTooLarge {
                requested: k,
                available: vectors.len(),
            });
        }
        let width = labels.first().map(|l| l.len()).unwrap_or(0);
        for label in &labels {
            if label.len() != width {
                return Err(Error::InvalidConfig(format!(
                    "label width {} does not match expected {}",
                    label.len(),
                    width
                )));
            }
        }
        let index = NearestNeighbors::fit(vectors)?;
        Ok(Self { index, labels, k })
    }

    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Predict a label vector for the query
    pub fn predict(&self, query: &Vector) -> Result<Vec<u32>> {
        let neighbors = self.index.neighbors(query, self.k)?;
        let width = self.labels.first().map(|l| l.len()).unwrap_or(0);

        let mut predicted = Vec::with_capacity(width);
        for position in 0..width {
            // BTreeMap iterates label values in ascending order, so the
            // first strict maximum is the smallest winning label.
            let mut votes: BTreeMap<u32, f64> = BTreeMap::new();
            for neighbor in &neighbors {
                let weight = 1.0 / f64::from(neighbor.distance.max(DISTANCE_FLOOR));
                let label = self.labels[neighbor.index][position];
                *votes.entry(label).or_insert(0.0) += weight;
            }

            let mut best_label = 0u32;
            let mut best_weight = f64::NEG_INFINITY;
            for (label, weight) in votes {
                if weight > best_weight {
                    best_label = label;
                    best_weight = weight;
                }
            }
            predicted.push(best_label);
        }
        Ok(predicted)
    }
}

//! Weighted category voting over a similarity neighborhood.

use crate::record::{AnimalCategory, Corpus};
use logoguide_core::{Neighbor, DISTANCE_FLOOR};
use std::collections::BTreeMap;

/// Normalized weight per animal category, built fresh per query.
///
/// Weights sum to 1.0 when non-empty; categories absent from the
/// neighborhood are implicitly weight 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDistribution {
    weights: BTreeMap<AnimalCategory, f64>,
}

impl CategoryDistribution {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    #[must_use]
    pub fn weight(&self, category: AnimalCategory) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterate `(category, weight)` in ascending category order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (AnimalCategory, f64)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, *w))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    #[cfg(test)]
    pub(crate) fn from_weights(weights: BTreeMap<AnimalCategory, f64>) -> Self {
        Self { weights }
    }
}

/// Aggregate a neighborhood into a normalized category distribution.
///
/// Non-animal neighbors are discarded entirely: they contribute neither a
/// category entry nor anything to the normalization total. Retained
/// neighbors weigh in at `1 / max(distance, DISTANCE_FLOOR)`, normalized
/// over the retained set and accumulated per category in input neighbor
/// order. No animal neighbors at all yields the empty distribution.
#[must_use]
pub fn vote(neighbors: &[Neighbor], corpus: &Corpus) -> CategoryDistribution {
    let mut retained: Vec<(AnimalCategory, f64)> = Vec::new();
    let mut total = 0.0f64;

    for neighbor in neighbors {
        let Some(record) = corpus.get(neighbor.index) else {
            continue;
        };
        let Some(category) = record.animal_category() else {
            continue;
        };
        let weight = 1.0 / f64::from(neighbor.distance.max(DISTANCE_FLOOR));
        total += weight;
        retained.push((category, weight));
    }

    let mut weights = BTreeMap::new();
    if total > 0.0 {
        for (category, weight) in retained {
            *weights.entry(category).or_insert(0.0) += weight / total;
        }
    }
    CategoryDistribution { weights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ReferenceRecord;
    use logoguide_core::Neighbor;

    fn corpus() -> Corpus {
        let records = vec![
            ReferenceRecord {
                name: "R1".to_string(),
                summary: "a running fox logo".to_string(),
                features: vec![0, 0, 0, 0, 1, 5],
            },
            ReferenceRecord {
                name: "R2".to_string(),
                summary: "a flying eagle logo".to_string(),
                features: vec![0, 0, 0, 0, 1, 2],
            },
            ReferenceRecord {
                name: "R3".to_string(),
                summary: "a blue tech startup".to_string(),
                features: vec![0, 0, 0, 0, 0, 0],
            },
            ReferenceRecord {
                name: "R4".to_string(),
                summary: "another fox logo".to_string(),
                features: vec![0, 0, 0, 0, 1, 5],
            },
        ];
        Corpus::from_records(records).unwrap()
    }

    fn neighbor(distance: f32, index: usize) -> Neighbor {
        Neighbor { distance, index }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let distribution = vote(
            &[neighbor(0.5, 0), neighbor(0.8, 1), neighbor(0.2, 2)],
            &corpus(),
        );
        assert!((distribution.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_animal_neighbors_fully_discarded() {
        // R3 is closest but non-animal: it must not appear and must not
        // dilute the remaining weights.
        let with_r3 = vote(
            &[neighbor(0.1, 2), neighbor(0.5, 0), neighbor(0.8, 1)],
            &corpus(),
        );
        let without_r3 = vote(&[neighbor(0.5, 0), neighbor(0.8, 1)], &corpus());

        assert_eq!(with_r3, without_r3);
        assert_eq!(with_r3.len(), 2);
    }

    #[test]
    fn test_closer_neighbor_weighs_more() {
        let distribution = vote(&[neighbor(0.5, 0), neighbor(0.8, 1)], &corpus());
        assert!(distribution.weight(AnimalCategory::Fox) > distribution.weight(AnimalCategory::Eagle));
    }

    #[test]
    fn test_same_category_accumulates() {
        let distribution = vote(&[neighbor(0.5, 0), neighbor(0.5, 3)], &corpus());
        assert_eq!(distribution.len(), 1);
        assert!((distribution.weight(AnimalCategory::Fox) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_animal_neighbors_yields_empty() {
        let distribution = vote(&[neighbor(0.1, 2)], &corpus());
        assert!(distribution.is_empty());

        let empty = vote(&[], &corpus());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_zero_distance_dominates_without_crashing() {
        let distribution = vote(&[neighbor(0.0, 0), neighbor(0.5, 1)], &corpus());
        assert!((distribution.total() - 1.0).abs() < 1e-9);
        assert!(distribution.weight(AnimalCategory::Fox) > 0.999);
    }

    #[test]
    fn test_out_of_range_index_skipped() {
        let distribution = vote(&[neighbor(0.5, 0), neighbor(0.5, 99)], &corpus());
        assert_eq!(distribution.len(), 1);
        assert!((distribution.total() - 1.0).abs() < 1e-9);
    }
}

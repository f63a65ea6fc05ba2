//! Embedding-space resolution of a fuzzy category distribution.

use crate::catalog::AnimalCatalog;
use crate::record::AnimalCategory;
use crate::vote::CategoryDistribution;
use logoguide_core::Vector;

/// Collapse a weighted category distribution into the single closest
/// category.
///
/// The composite point is the weight-scaled sum of the voted categories'
/// embeddings; the answer is the nearest of *all* category embeddings to
/// that point, ties broken by ascending category code. The winner may be
/// a category that received zero direct votes when its embedding lies
/// between the voted ones; that is the intended behavior of the
/// vote-then-reproject design, not a bug.
#[must_use]
pub fn resolve(
    distribution: &CategoryDistribution,
    catalog: &AnimalCatalog,
) -> Option<AnimalCategory> {
    if distribution.is_empty() {
        return None;
    }

    let mut composite: Option<Vector> = None;
    for (category, weight) in distribution.iter() {
        let scaled = catalog.embedding(category) * (weight as f32);
        composite = Some(match composite {
            Some(acc) => &acc + &scaled,
            None => scaled,
        });
    }
    let composite = composite?;

    let mut best: Option<(AnimalCategory, f32)> = None;
    for category in AnimalCategory::ALL {
        let distance = catalog.embedding(category).l2_distance(&composite);
        // Strict comparison keeps the lowest code on ties (ALL is in
        // ascending code order).
        if best.map(|(_, d)| distance < d).unwrap_or(true) {
            best = Some((category, distance));
        }
    }
    best.map(|(category, _)| category)
}

//! Display formatting of neighbor lists.
//!
//! A neighbor whose identifier has no display asset in the catalog is
//! dropped from the list and reported as a [`LookupGap`] instead of
//! aborting the whole response; surviving entries keep their order and
//! scores untouched.

use crate::catalog::{AnimalCatalog, LogoCatalog};
use crate::record::{AnimalCategory, Corpus};
use crate::vote::CategoryDistribution;
use logoguide_core::Neighbor;
use serde::Serialize;
use tracing::warn;

/// One reference logo similar to the query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogoMatch {
    pub name: String,
    pub distance: f32,
    pub image: String,
}

/// One animal category suggested for the query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnimalMatch {
    pub animal: AnimalCategory,
    pub weight: f64,
    pub photo: String,
}

/// A neighbor dropped because its display asset is missing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "catalog", content = "name", rename_all = "lowercase")]
pub enum LookupGap {
    Logo(String),
    Animal(AnimalCategory),
}

/// Format a logo neighborhood into display entries.
///
/// Names are hyphenated to match the display catalog's keys. Gaps are
/// appended to `gaps` and logged, never propagated as errors.
pub fn format_logo_matches(
    neighbors: &[Neighbor],
    corpus: &Corpus,
    catalog: &LogoCatalog,
    gaps: &mut Vec<LookupGap>,
) -> Vec<LogoMatch> {
    let mut matches = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        let Some(record) = corpus.get(neighbor.index) else {
            continue;
        };
        let name = LogoCatalog::display_key(&record.name);
        match catalog.image(&record.name) {
            Some(image) => matches.push(LogoMatch {
                name,
                distance: neighbor.distance,
                image: image.to_string(),
            }),
            None => {
                warn!(name = %name, "no logo image for neighbor, dropping entry");
                gaps.push(LookupGap::Logo(name));
            }
        }
    }
    matches
}

/// Format a category distribution into display entries, heaviest first,
/// ties by ascending category code.
pub fn format_animal_matches(
    distribution: &CategoryDistribution,
    catalog: &AnimalCatalog,
    gaps: &mut Vec<LookupGap>,
) -> Vec<AnimalMatch> {
    let mut matches = Vec::with_capacity(distribution.len());
    for (animal, weight) in distribution.iter() {
        match catalog.photo(animal) {
            Some(photo) => matches.push(AnimalMatch {
                animal,
                weight,
                photo: photo.to_string(),
            }),
            None => {
                warn!(animal = %animal, "no photo for animal category, dropping entry");
                gaps.push(LookupGap::Animal(animal));
            }
        }
    }
    matches.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.animal.cmp(&b.animal))
    });
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ReferenceRecord;
    use ahash::AHashMap;
    use logoguide_core::Vector;
    use std::collections::BTreeMap;

    fn corpus() -> Corpus {
        Corpus::from_records(vec![
            ReferenceRecord {
                name: "Fire Fox".to_string(),
                summary: "a running fox logo".to_string(),
                features: vec![0, 0, 0, 0, 1, 5],
            },
            ReferenceRecord {
                name: "Sky Eagle".to_string(),
                summary: "a flying eagle logo".to_string(),
                features: vec![0, 0, 0, 0, 1, 2],
            },
            ReferenceRecord {
                name: "Blue Tech".to_string(),
                summary: "a blue tech startup".to_string(),
                features: vec![0, 0, 0, 0, 0, 0],
            },
        ])
        .unwrap()
    }

    fn logo_catalog() -> LogoCatalog {
        let mut images = AHashMap::new();
        images.insert("Fire-Fox".to_string(), "https://img/fox.png".to_string());
        images.insert("Blue-Tech".to_string(), "https://img/tech.png".to_string());
        LogoCatalog::new(images)
    }

    #[test]
    fn test_logo_order_and_distances_preserved() {
        let neighbors = vec![
            Neighbor { distance: 0.25, index: 0 },
            Neighbor { distance: 0.75, index: 2 },
        ];
        let mut gaps = Vec::new();
        let matches = format_logo_matches(&neighbors, &corpus(), &logo_catalog(), &mut gaps);

        assert!(gaps.is_empty());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "Fire-Fox");
        assert_eq!(matches[0].distance, 0.25);
        assert_eq!(matches[1].name, "Blue-Tech");
        assert_eq!(matches[1].distance, 0.75);
    }

    #[test]
    fn test_missing_image_becomes_gap_not_failure() {
        // "Sky Eagle" has no catalog entry; the rest survive untouched.
        let neighbors = vec![
            Neighbor { distance: 0.25, index: 0 },
            Neighbor { distance: 0.5, index: 1 },
            Neighbor { distance: 0.75, index: 2 },
        ];
        let mut gaps = Vec::new();
        let matches = format_logo_matches(&neighbors, &corpus(), &logo_catalog(), &mut gaps);

        assert_eq!(gaps, vec![LookupGap::Logo("Sky-Eagle".to_string())]);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "Fire-Fox");
        assert_eq!(matches[0].distance, 0.25);
        assert_eq!(matches[1].name, "Blue-Tech");
        assert_eq!(matches[1].distance, 0.75);
    }

    fn animal_catalog(photo_for: &[AnimalCategory]) -> AnimalCatalog {
        let embeddings: BTreeMap<AnimalCategory, Vector> = AnimalCategory::ALL
            .into_iter()
            .map(|c| (c, Vector::new(vec![c.code() as f32, 0.0, 0.0])))
            .collect();
        let photos: BTreeMap<AnimalCategory, String> = photo_for
            .iter()
            .map(|c| (*c, format!("https://photos/{}", c.name())))
            .collect();
        AnimalCatalog::from_reduced(embeddings, photos).unwrap()
    }

    #[test]
    fn test_animal_matches_sorted_by_weight() {
        let distribution = CategoryDistribution::from_weights(BTreeMap::from([
            (AnimalCategory::Fox, 0.3),
            (AnimalCategory::Eagle, 0.7),
        ]));
        let catalog = animal_catalog(&[AnimalCategory::Fox, AnimalCategory::Eagle]);

        let mut gaps = Vec::new();
        let matches = format_animal_matches(&distribution, &catalog, &mut gaps);

        assert!(gaps.is_empty());
        assert_eq!(matches[0].animal, AnimalCategory::Eagle);
        assert_eq!(matches[0].weight, 0.7);
        assert_eq!(matches[1].animal, AnimalCategory::Fox);
    }

    #[test]
    fn test_missing_photo_becomes_gap() {
        let distribution = CategoryDistribution::from_weights(BTreeMap::from([
            (AnimalCategory::Fox, 0.5),
            (AnimalCategory::Eagle, 0.5),
        ]));
        let catalog = animal_catalog(&[AnimalCategory::Fox]);

        let mut gaps = Vec::new();
        let matches = format_animal_matches(&distribution, &catalog, &mut gaps);

        assert_eq!(gaps, vec![LookupGap::Animal(AnimalCategory::Eagle)]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].animal, AnimalCategory::Fox);
    }
}

//! The trained model and its query pipeline.
//!
//! Everything is trained exactly once, at startup; the resulting
//! [`GuideModel`] is immutable and can be shared across any number of
//! concurrent queries without locking.

use crate::catalog::{AnimalCatalog, LogoCatalog};
use crate::format::{
    format_animal_matches, format_logo_matches, AnimalMatch, LogoMatch, LookupGap,
};
use crate::record::{AnimalCategory, Corpus, FEATURE_ANIMAL_FLAG, FEATURE_ANIMAL_GATE};
use crate::resolve::resolve;
use crate::vote::vote;
use logoguide_core::{
    Error, KnnClassifier, NearestNeighbors, Result, TfidfVectorizer, DEFAULT_MAX_FEATURES,
};
use serde::Serialize;
use tracing::{info, warn};

/// Neighborhood sizes and vocabulary cap for training
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// TF-IDF vocabulary cap
    pub max_features: usize,
    /// k of the general guideline-flag classifier
    pub guideline_k: usize,
    /// k of the small classifier gating the animal branch
    pub animal_gate_k: usize,
    /// Neighborhood size for logo suggestions
    pub logo_neighbors: usize,
    /// Neighborhood size for animal-category voting; larger than the logo
    /// neighborhood to raise recall for the comparatively rare
    /// animal-themed records
    pub animal_neighbors: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            guideline_k: 15,
            animal_gate_k: 3,
            logo_neighbors: 15,
            animal_neighbors: 35,
        }
    }
}

/// The complete per-query result, ready for a transport layer to
/// serialize.
#[derive(Debug, Clone, Serialize)]
pub struct GuideResponse {
    /// Predicted guideline feature vector
    pub guidelines: Vec<u32>,
    /// Animal-themed indicator; `None` when the animal branch did not run
    pub is_animal: Option<bool>,
    /// The single inferred animal archetype, if any
    pub animal: Option<AnimalCategory>,
    /// Reference logos most similar to the description, nearest first
    pub similar_logos: Vec<LogoMatch>,
    /// Suggested animal references, heaviest vote first; present only
    /// when the animal branch ran
    pub similar_animals: Option<Vec<AnimalMatch>>,
    /// Neighbors dropped because a display asset was missing
    pub lookup_gaps: Vec<LookupGap>,
}

/// All trained artifacts: vectorizer, classifiers, similarity index and
/// reference catalogs.
pub struct GuideModel {
    vectorizer: TfidfVectorizer,
    guideline_classifier: KnnClassifier,
    animal_gate_classifier: KnnClassifier,
    index: NearestNeighbors,
    corpus: Corpus,
    animals: AnimalCatalog,
    logos: LogoCatalog,
    logo_neighbors: usize,
    animal_neighbors: usize,
}

impl GuideModel {
    /// Train the model over the reference corpus. Expensive, blocking,
    /// and done once per process lifetime.
    ///
    /// Configured neighborhood sizes larger than the corpus are clamped
    /// to the corpus size with a warning, so a small corpus degrades
    /// loudly instead of failing every query.
    pub fn train(
        config: ModelConfig,
        corpus: Corpus,
        animals: AnimalCatalog,
        logos: LogoCatalog,
    ) -> Result<Self> {
        if config.max_features == 0 {
            return Err(Error::InvalidConfig(
                "max_features must be positive".to_string(),
            ));
        }
        for (name, k) in [
            ("guideline_k", config.guideline_k),
            ("animal_gate_k", config.animal_gate_k),
            ("logo_neighbors", config.logo_neighbors),
            ("animal_neighbors", config.animal_neighbors),
        ] {
            if k == 0 {
                return Err(Error::InvalidConfig(format!("{} must be positive", name)));
            }
        }

        let clamp = |name: &str, k: usize| -> usize {
            if k > corpus.len() {
                warn!(
                    requested = k,
                    available = corpus.len(),
                    "{} exceeds corpus size, clamping",
                    name
                );
                corpus.len()
            } else {
                k
            }
        };
        let guideline_k = clamp("guideline_k", config.guideline_k);
        let animal_gate_k = clamp("animal_gate_k", config.animal_gate_k);
        let logo_neighbors = clamp("logo_neighbors", config.logo_neighbors);
        let animal_neighbors = clamp("animal_neighbors", config.animal_neighbors);

        let summaries = corpus.summaries();
        let vectorizer = TfidfVectorizer::fit(&summaries, config.max_features);
        let vectors = vectorizer.transform_batch(&summaries);
        let labels = corpus.feature_labels();

        let guideline_classifier =
            KnnClassifier::fit(vectors.clone(), labels.clone(), guideline_k)?;
        let animal_gate_classifier = KnnClassifier::fit(vectors.clone(), labels, animal_gate_k)?;
        let index = NearestNeighbors::fit(vectors)?;

        info!(
            records = corpus.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "model trained"
        );

        Ok(Self {
            vectorizer,
            guideline_classifier,
            animal_gate_classifier,
            index,
            corpus,
            animals,
            logos,
            logo_neighbors,
            animal_neighbors,
        })
    }

    #[inline]
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> &NearestNeighbors {
        &self.index
    }

    #[inline]
    #[must_use]
    pub fn animal_catalog(&self) -> &AnimalCatalog {
        &self.animals
    }

    /// Run the full pipeline for one description.
    ///
    /// Synchronous, CPU-bound, touches no mutable state; a failure here
    /// is per-request and never affects other in-flight queries.
    pub fn query(&self, description: &str) -> Result<GuideResponse> {
        if description.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let vector = self.vectorizer.transform(description);
        let guidelines = self.guideline_classifier.predict(&vector)?;
        let gate = self.animal_gate_classifier.predict(&vector)?;

        let mut lookup_gaps = Vec::new();
        let logo_neighborhood = self.index.neighbors(&vector, self.logo_neighbors)?;
        let similar_logos =
            format_logo_matches(&logo_neighborhood, &self.corpus, &self.logos, &mut lookup_gaps);

        let (is_animal, animal, similar_animals) = if gate[FEATURE_ANIMAL_GATE] == 1 {
            let neighborhood = self.index.neighbors(&vector, self.animal_neighbors)?;
            let distribution = vote(&neighborhood, &self.corpus);
            // An empty distribution despite the gate firing means the
            // classifier and the index disagree; answer "no animal"
            // rather than failing.
            let animal = resolve(&distribution, &self.animals);
            let matches = format_animal_matches(&distribution, &self.animals, &mut lookup_gaps);
            (Some(gate[FEATURE_ANIMAL_FLAG] == 1), animal, Some(matches))
        } else {
            (None, None, None)
        };

        Ok(GuideResponse {
            guidelines,
            is_animal,
            animal,
            similar_logos,
            similar_animals,
            lookup_gaps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::synthetic_raw_embeddings;
    use crate::record::ReferenceRecord;
    use ahash::AHashMap;
    use std::collections::BTreeMap;

    fn record(name: &str, summary: &str, features: Vec<u32>) -> ReferenceRecord {
        ReferenceRecord {
            name: name.to_string(),
            summary: summary.to_string(),
            features,
        }
    }

    fn animal_corpus() -> Corpus {
        Corpus::from_records(vec![
            record("Fox Co", "a running fox logo", vec![0, 1, 0, 0, 1, 5]),
            record("Eagle Co", "a flying eagle logo", vec![0, 1, 0, 0, 1, 2]),
            record("Bear Co", "a strong bear mark", vec![0, 1, 0, 0, 1, 11]),
            record("Tiger Co", "a striped tiger emblem", vec![0, 1, 0, 0, 1, 14]),
            record("Blue Tech", "a blue tech startup", vec![0, 0, 0, 0, 0, 0]),
        ])
        .unwrap()
    }

    fn catalogs() -> (AnimalCatalog, LogoCatalog) {
        let photos: BTreeMap<String, String> = AnimalCategory::ALL
            .into_iter()
            .map(|c| (c.name().to_string(), format!("https://photos/{}", c.name())))
            .collect();
        let animals = AnimalCatalog::build(&synthetic_raw_embeddings(), &photos).unwrap();

        let mut images = AHashMap::new();
        for name in ["Fox-Co", "Eagle-Co", "Bear-Co", "Tiger-Co", "Blue-Tech"] {
            images.insert(name.to_string(), format!("https://img/{}.png", name));
        }
        (animals, LogoCatalog::new(images))
    }

    fn small_model() -> GuideModel {
        let (animals, logos) = catalogs();
        let config = ModelConfig {
            guideline_k: 3,
            animal_gate_k: 3,
            logo_neighbors: 3,
            animal_neighbors: 5,
            ..ModelConfig::default()
        };
        GuideModel::train(config, animal_corpus(), animals, logos).unwrap()
    }

    #[test]
    fn test_exact_match_query_follows_its_record() {
        let model = small_model();
        // Summary of "Fox Co", verbatim: distance 0 dominates both the
        // classifiers and the vote.
        let response = model.query("a running fox logo").unwrap();

        assert_eq!(response.guidelines, vec![0, 1, 0, 0, 1, 5]);
        assert_eq!(response.is_animal, Some(true));
        assert_eq!(response.animal, Some(AnimalCategory::Fox));

        let animals = response.similar_animals.unwrap();
        assert_eq!(animals[0].animal, AnimalCategory::Fox);
        assert!(animals[0].weight > 0.999);
    }

    #[test]
    fn test_non_animal_query_skips_animal_branch() {
        let model = small_model();
        let response = model.query("a blue tech startup").unwrap();

        assert_eq!(response.is_animal, None);
        assert_eq!(response.animal, None);
        assert!(response.similar_animals.is_none());
        assert!(!response.similar_logos.is_empty());
    }

    #[test]
    fn test_empty_query_is_input_error() {
        let model = small_model();
        assert!(matches!(model.query("").unwrap_err(), Error::EmptyQuery));
        assert!(matches!(model.query("   \t").unwrap_err(), Error::EmptyQuery));
    }

    #[test]
    fn test_oversized_neighborhoods_clamped_at_training() {
        let (animals, logos) = catalogs();
        let model =
            GuideModel::train(ModelConfig::default(), animal_corpus(), animals, logos).unwrap();
        // Defaults (15/35) exceed the 5-record corpus; queries must still
        // serve with clamped neighborhoods.
        let response = model.query("a running fox logo").unwrap();
        assert_eq!(response.similar_logos.len(), 5);
    }

    #[test]
    fn test_identical_queries_identical_responses() {
        let model = small_model();
        let a = model.query("a striped tiger emblem").unwrap();
        let b = model.query("a striped tiger emblem").unwrap();
        assert_eq!(a.guidelines, b.guidelines);
        assert_eq!(a.animal, b.animal);
        assert_eq!(a.similar_logos, b.similar_logos);
    }

    #[test]
    fn test_zero_k_rejected() {
        let (animals, logos) = catalogs();
        let config = ModelConfig {
            guideline_k: 0,
            ..ModelConfig::default()
        };
        assert!(GuideModel::train(config, animal_corpus(), animals, logos).is_err());
    }
}

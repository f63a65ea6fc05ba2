use crate::pca::principal_components;
use crate::record::AnimalCategory;
use ahash::AHashMap;
use logoguide_core::{Error, Result, Vector};
use std::collections::BTreeMap;

/// Dimension of the reduced category embedding space
pub const EMBEDDING_DIM: usize = 3;

/// Immutable per-category lookup tables: reduced embedding vector and
/// display photo.
///
/// The embedding space is rebuilt in full on every startup; coordinates
/// are only comparable within one build.
#[derive(Debug, Clone)]
pub struct AnimalCatalog {
    embeddings: BTreeMap<AnimalCategory, Vector>,
    photos: BTreeMap<AnimalCategory, String>,
}

impl AnimalCatalog {
    /// Build the catalog from raw high-dimensional semantic vectors.
    ///
    /// The reduction is fit over every entry of `raw_embeddings` (sorted
    /// by name for determinism), then the rows for the 14 categories are
    /// kept. Every category must have a raw embedding; photos may be
    /// missing and surface later as lookup gaps.
    pub fn build(
        raw_embeddings: &BTreeMap<String, Vec<f32>>,
        photos: &BTreeMap<String, String>,
    ) -> Result<Self> {
        for category in AnimalCategory::ALL {
            if !raw_embeddings.contains_key(category.name()) {
                return Err(Error::Dataset(format!(
                    "no semantic embedding for animal category '{}'",
                    category.name()
                )));
            }
        }

        let names: Vec<&String> = raw_embeddings.keys().collect();
        let rows: Vec<Vec<f32>> = raw_embeddings.values().cloned().collect();
        let reduced = principal_components(&rows, EMBEDDING_DIM)?;

        let by_name: AHashMap<&str, &Vec<f32>> = names
            .iter()
            .map(|n| n.as_str())
            .zip(reduced.iter())
            .collect();

        let mut embeddings = BTreeMap::new();
        for category in AnimalCategory::ALL {
            // Present: checked above.
            if let Some(coords) = by_name.get(category.name()) {
                embeddings.insert(category, Vector::from_slice(coords));
            }
        }

        let photos = photos
            .iter()
            .filter_map(|(name, url)| {
                AnimalCategory::from_name(name).map(|category| (category, url.clone()))
            })
            .collect();

        Ok(Self { embeddings, photos })
    }

    /// Build directly from already-reduced coordinates.
    pub fn from_reduced(
        embeddings: BTreeMap<AnimalCategory, Vector>,
        photos: BTreeMap<AnimalCategory, String>,
    ) -> Result<Self> {
        for category in AnimalCategory::ALL {
            match embeddings.get(&category) {
                None => {
                    return Err(Error::Dataset(format!(
                        "no embedding for animal category '{}'",
                        category.name()
                    )))
                }
                Some(vector) if vector.dim() != EMBEDDING_DIM => {
                    return Err(Error::InvalidDimension {
                        expected: EMBEDDING_DIM,
                        actual: vector.dim(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Self { embeddings, photos })
    }

    /// Embedding vector of a category; every category has one by
    /// construction.
    #[must_use]
    pub fn embedding(&self, category: AnimalCategory) -> &Vector {
        &self.embeddings[&category]
    }

    #[must_use]
    pub fn photo(&self, category: AnimalCategory) -> Option<&str> {
        self.photos.get(&category).map(|s| s.as_str())
    }
}

/// Mapping from (hyphenated) reference-record name to display image
#[derive(Debug, Clone, Default)]
pub struct LogoCatalog {
    images: AHashMap<String, String>,
}

impl LogoCatalog {
    #[must_use]
    pub fn new(images: AHashMap<String, String>) -> Self {
        Self { images }
    }

    /// Catalog keys use hyphens where record names use spaces
    #[must_use]
    pub fn display_key(name: &str) -> String {
        name.replace(' ', "-")
    }

    #[must_use]
    pub fn image(&self, name: &str) -> Option<&str> {
        self.images.get(&Self::display_key(name)).map(|s| s.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Synthetic high-dimensional embeddings for tests: moment-curve style
/// coordinates keep every category separated after reduction.
#[cfg(test)]
pub(crate) fn synthetic_raw_embeddings() -> BTreeMap<String, Vec<f32>> {
    AnimalCategory::ALL
        .into_iter()
        .map(|category| {
            let c = category.code() as f32;
            (
                category.name().to_string(),
                vec![c, c * c / 10.0, (c - 7.0) * (c - 7.0) / 5.0, c.sqrt()],
            )
        })
        .collect()
}

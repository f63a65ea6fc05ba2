//! Loading of the JSON reference datasets.
//!
//! The datasets are read once at startup; any I/O or shape failure is
//! fatal to initialization, since a partially loaded model must never
//! serve queries.

use crate::catalog::LogoCatalog;
use crate::record::{Corpus, ReferenceRecord};
use ahash::AHashMap;
use logoguide_core::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Standard dataset file names inside the data directory
pub const CORPUS_FILE: &str = "company_descriptions.json";
pub const EMBEDDINGS_FILE: &str = "glove_animal_embeddings.json";
pub const ANIMAL_PHOTOS_FILE: &str = "animals_photos.json";
pub const LOGO_IMAGES_FILE: &str = "logos_dict.json";

#[derive(Deserialize)]
struct CorpusFile {
    logos: Vec<ReferenceRecord>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::Dataset(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Dataset(format!("malformed {}: {}", path.display(), e)))
}

/// Load and validate the reference corpus
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let file: CorpusFile = read_json(path)?;
    Corpus::from_records(file.logos)
}

/// Load the raw high-dimensional animal embeddings, keyed by animal name
pub fn load_animal_embeddings(path: &Path) -> Result<BTreeMap<String, Vec<f32>>> {
    let embeddings: BTreeMap<String, Vec<f32>> = read_json(path)?;
    if embeddings.is_empty() {
        return Err(Error::Dataset(format!(
            "{} contains no embeddings",
            path.display()
        )));
    }
    Ok(embeddings)
}

/// Load the animal display photos, keyed by animal name
pub fn load_animal_photos(path: &Path) -> Result<BTreeMap<String, String>> {
    read_json(path)
}

/// Load the logo display images, keyed by hyphenated record name
pub fn load_logo_catalog(path: &Path) -> Result<LogoCatalog> {
    let images: AHashMap<String, String> = read_json(path)?;
    Ok(LogoCatalog::new(images))
}

/// All reference datasets, loaded from a single data directory with the
/// standard file names.
pub struct Datasets {
    pub corpus: Corpus,
    pub animal_embeddings: BTreeMap<String, Vec<f32>>,
    pub animal_photos: BTreeMap<String, String>,
    pub logo_catalog: LogoCatalog,
}

impl Datasets {
    pub fn load(data_dir: &Path) -> Result<Self> {
        let file = |name: &str| -> PathBuf { data_dir.join(name) };
        Ok(Self {
            corpus: load_corpus(&file(CORPUS_FILE))?,
            animal_embeddings: load_animal_embeddings(&file(EMBEDDINGS_FILE))?,
            animal_photos: load_animal_photos(&file(ANIMAL_PHOTOS_FILE))?,
            logo_catalog: load_logo_catalog(&file(LOGO_IMAGES_FILE))?,
        })
    }
}

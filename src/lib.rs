//! # logoguide
//!
//! A brand-design guideline and animal-archetype recommender.
//!
//! Given a short free-text company description, logoguide predicts a set
//! of categorical design-guideline flags, retrieves the most textually
//! similar reference logos, and - when the description is classified as
//! animal-themed - infers the single closest animal archetype together
//! with a ranked list of similar animal references.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install logoguide
//! logoguide --data-dir ./local_static --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use logoguide::prelude::*;
//! use std::path::Path;
//!
//! let datasets = Datasets::load(Path::new("./local_static")).unwrap();
//! let animals =
//!     AnimalCatalog::build(&datasets.animal_embeddings, &datasets.animal_photos).unwrap();
//! let model = GuideModel::train(
//!     ModelConfig::default(),
//!     datasets.corpus,
//!     animals,
//!     datasets.logo_catalog,
//! )
//! .unwrap();
//!
//! let response = model.query("a running fox logo").unwrap();
//! println!("animal: {:?}", response.animal);
//! ```
//!
//! ## Crate Structure
//!
//! logoguide is composed of several crates:
//!
//! - `logoguide-core` - TF-IDF vectorization, k-NN search and
//!   classification
//! - `logoguide-guide` - category voting, embedding resolution, catalogs
//!   and the trained model
//! - `logoguide-api` - the REST endpoint

// Re-export core types
pub use logoguide_core::{
    Error, KnnClassifier, NearestNeighbors, Neighbor, Result, TfidfVectorizer, Vector,
    DEFAULT_MAX_FEATURES, DISTANCE_FLOOR,
};

// Re-export the inference pipeline
pub use logoguide_guide::{
    resolve, vote, AnimalCatalog, AnimalCategory, AnimalMatch, CategoryDistribution, Corpus,
    Datasets, GuideModel, GuideResponse, LogoCatalog, LogoMatch, LookupGap, ModelConfig,
    ReferenceRecord, EMBEDDING_DIM,
};

// Re-export API
pub use logoguide_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnimalCatalog, AnimalCategory, Corpus, Datasets, Error, GuideModel, GuideResponse,
        LogoCatalog, ModelConfig, NearestNeighbors, ReferenceRecord, RestApi, Result,
        TfidfVectorizer, Vector,
    };
}

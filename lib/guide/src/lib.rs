//! # logoguide Guide
//!
//! Inference pipeline for the logoguide recommender.
//!
//! Builds on [`logoguide_core`] to turn a company description into
//! brand-design guidance:
//!
//! - [`Corpus`] / [`ReferenceRecord`] - the immutable reference dataset
//! - [`AnimalCatalog`] / [`LogoCatalog`] - per-category and per-logo
//!   display lookup tables, with PCA-reduced category embeddings
//! - [`vote`] - weighted category voting over a similarity neighborhood
//! - [`resolve`] - embedding-space resolution to a single category
//! - [`GuideModel`] - all trained artifacts plus the query pipeline
//!
//! ## Example
//!
//! ```rust,no_run
//! use logoguide_guide::{Datasets, GuideModel, ModelConfig, AnimalCatalog};
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
//! println!("{:?}", response.animal);
//! ```

pub mod catalog;
pub mod dataset;
pub mod format;
pub mod model;
pub mod pca;
pub mod record;
pub mod resolve;
pub mod vote;

pub use catalog::{AnimalCatalog, LogoCatalog, EMBEDDING_DIM};
pub use dataset::Datasets;
pub use format::{AnimalMatch, LogoMatch, LookupGap};
pub use model::{GuideModel, GuideResponse, ModelConfig};
pub use record::{AnimalCategory, Corpus, ReferenceRecord};
pub use resolve::resolve;
pub use vote::{vote, CategoryDistribution};

//! # logoguide Core
//!
//! Core library for the logoguide recommender.
//!
//! This crate provides the text-similarity primitives:
//!
//! - [`Vector`] - Dense vector representation with L2 distance
//! - [`TfidfVectorizer`] - Bag-of-n-grams TF-IDF vectorization
//! - [`NearestNeighbors`] - Exact k-nearest-neighbor index
//! - [`KnnClassifier`] - Inverse-distance-weighted multi-label classifier
//!
//! ## Example
//!
//! ```rust
//! use logoguide_core::{TfidfVectorizer, NearestNeighbors, DEFAULT_MAX_FEATURES};
//!
//! let corpus = vec![
//!     "a running fox logo".to_string(),
//!     "a flying eagle logo".to_string(),
//! ];
//!
//! // Fit once over the reference corpus
//! let vectorizer = TfidfVectorizer::fit(&corpus, DEFAULT_MAX_FEATURES);
//! let index = NearestNeighbors::fit(vectorizer.transform_batch(&corpus)).unwrap();
//!
//! // Query
//! let query = vectorizer.transform("fox logo");
//! let neighbors = index.neighbors(&query, 2).unwrap();
//! assert_eq!(neighbors[0].index, 0);
//! ```

pub mod error;
pub mod knn;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use error::{Error, Result};
pub use knn::{KnnClassifier, NearestNeighbors, Neighbor, DISTANCE_FLOOR};
pub use tfidf::{TfidfVectorizer, DEFAULT_MAX_FEATURES};
pub use vector::Vector;

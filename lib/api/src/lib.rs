//! # logoguide API
//!
//! REST layer for the logoguide recommender: a single
//! `GET /logoguide?description=...` endpoint serving the trained
//! [`GuideModel`](logoguide_guide::GuideModel).

pub mod rest;

pub use rest::RestApi;

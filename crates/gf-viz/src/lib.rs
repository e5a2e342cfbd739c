//! # gf-viz
//!
//! Visualization data artifacts for genflat.
//!
//! This crate is intentionally dependency-light and focuses on emitting
//! plot-friendly JSON structures (arrays instead of nested objects). The
//! actual rendering lives outside the pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Histogram artifacts (one JSON document per histogram).
pub mod artifact;

pub use artifact::{HistArtifact, SCHEMA_VERSION};

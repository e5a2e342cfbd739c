//! # gf-hist
//!
//! Weighted 1-D histogram aggregation for the genflat pipeline: a registry
//! with a book → fill → finalize lifecycle, per-bin sum-of-squared-weights
//! for error propagation, and optional bin-width normalization applied at
//! most once.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod histogram;
pub mod registry;
pub mod rows;

pub use histogram::{uniform_edges, FlowPolicy, Histogram};
pub use registry::HistRegistry;
pub use rows::{book_default_hists, fill_flat_rows, HIST_LEAD_CHARGE, HIST_LEAD_PT, HIST_N_CAND};

//! # gf-event
//!
//! Per-event reduction pipeline: an event-scoped particle arena with
//! index-based decay links, final-state resolution of decay chains,
//! hard-process candidate selection, and flattening of one event into one
//! fixed-schema output row.
//!
//! Everything here is single-pass and streaming: one [`EventRecord`] is in
//! memory at a time, and no state crosses event boundaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod flatten;
pub mod resolve;
pub mod select;

pub use event::{EventRecord, ParticleRecord};
pub use flatten::Flattener;
pub use resolve::{resolve_final_state, MAX_RESOLVE_HOPS};
pub use select::{select, Selection};

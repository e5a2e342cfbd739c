//! # gf-core
//!
//! Shared error taxonomy and value types for the genflat pipeline:
//! 4-momenta, flat output rows, and the pdg-code → charge-sign convention.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ChargeConvention, FlatRow, FourMomentum, ETA_CLAMP};

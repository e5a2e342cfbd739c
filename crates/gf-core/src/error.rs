//! Error types for genflat

use thiserror::Error;

/// genflat error type
#[derive(Error, Debug)]
pub enum Error {
    /// Decay graph could not be resolved (cycle or excessive depth).
    ///
    /// Aborts the offending event only; the event index and pdg id are
    /// enough to reproduce the failure from a log line.
    #[error(
        "malformed decay graph in event {event_index}: pdg {pdg_id} not final after {hops} hops"
    )]
    MalformedGraph {
        /// Source-assigned index of the event being resolved.
        event_index: u64,
        /// Pdg code of the particle whose chain failed to terminate.
        pdg_id: i32,
        /// Hops taken before giving up.
        hops: usize,
    },

    /// A histogram name was booked twice.
    #[error("histogram '{name}' is already booked")]
    DuplicateHistogram {
        /// Offending histogram name.
        name: String,
    },

    /// Fill or a second normalization on an already-normalized histogram.
    #[error("histogram '{name}' is already normalized to bin width")]
    AlreadyNormalized {
        /// Offending histogram name.
        name: String,
    },

    /// Fill or normalization addressed a name that was never booked.
    #[error("histogram '{name}' is not booked")]
    UnknownHistogram {
        /// Offending histogram name.
        name: String,
    },

    /// Bin edges rejected at booking time.
    #[error("invalid binning for histogram '{name}': {reason}")]
    BadBinning {
        /// Offending histogram name.
        name: String,
        /// What was wrong with the edges.
        reason: String,
    },

    /// Invalid or incomplete charge-sign table.
    #[error("charge convention error: {0}")]
    ChargeConvention(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

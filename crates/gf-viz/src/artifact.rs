//! Numbers-first histogram artifacts.

use serde::Serialize;

use gf_core::Result;
use gf_hist::Histogram;

/// Artifact schema version.
pub const SCHEMA_VERSION: &str = "genflat/hist/v1";

/// One finalized histogram, flattened for plotting.
#[derive(Debug, Clone, Serialize)]
pub struct HistArtifact {
    /// Artifact schema version.
    pub schema_version: String,
    /// Histogram name.
    pub name: String,
    /// X axis title.
    pub title_x: String,
    /// Y axis title.
    pub title_y: String,
    /// Bin edges (length = len(y) + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents.
    pub y: Vec<f64>,
    /// Per-bin statistical errors (sqrt of summed squared weights).
    pub y_err: Vec<f64>,
    /// Total filled weight.
    pub sum_of_weights: f64,
    /// Number of in-range fills.
    pub entries: u64,
    /// Whether bin-width normalization was applied.
    pub normalized: bool,
}

impl HistArtifact {
    /// Flatten a finalized histogram into its artifact.
    pub fn from_histogram(hist: &Histogram) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            name: hist.name.clone(),
            title_x: hist.title_x.clone(),
            title_y: hist.title_y.clone(),
            bin_edges: hist.bin_edges.clone(),
            y: hist.bin_content.clone(),
            y_err: (0..hist.n_bins()).map(|i| hist.bin_error(i)).collect(),
            sum_of_weights: hist.sum_of_weights,
            entries: hist.entries,
            normalized: hist.normalized,
        }
    }

    /// Pretty JSON, the renderer's input format.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gf_hist::{FlowPolicy, HistRegistry};

    #[test]
    fn artifact_carries_errors_and_metadata() {
        let mut reg = HistRegistry::new();
        reg.book("h", vec![0.0, 10.0, 20.0], "x [GeV]", "Events / bin", FlowPolicy::Drop)
            .unwrap();
        reg.fill("h", 5.0, 2.0).unwrap();
        reg.fill("h", 15.0, 3.0).unwrap();

        let art = HistArtifact::from_histogram(reg.get("h").unwrap());
        assert_eq!(art.schema_version, SCHEMA_VERSION);
        assert_eq!(art.y, vec![2.0, 3.0]);
        assert_relative_eq!(art.y_err[0], 2.0, max_relative = 1e-12);
        assert_relative_eq!(art.y_err[1], 3.0, max_relative = 1e-12);
        assert_eq!(art.entries, 2);
        assert!(!art.normalized);

        let json = art.to_pretty_json().unwrap();
        assert!(json.contains("\"schema_version\""));
        assert!(json.contains("genflat/hist/v1"));
    }
}

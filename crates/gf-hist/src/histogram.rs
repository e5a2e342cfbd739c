//! The 1-D weighted histogram value type.

use serde::Serialize;

use gf_core::{Error, Result};

/// Under/overflow handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPolicy {
    /// Drop entries outside the histogram range. This is the standard
    /// under/overflow policy: the drop is silent and deliberate, not an
    /// error.
    #[default]
    Drop,
    /// Fold underflow into the first bin and overflow into the last bin.
    Fold,
}

/// A named 1-D histogram with per-bin sum of squared weights.
///
/// Mutated only through [`crate::registry::HistRegistry`]; once normalized
/// it is read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// Histogram name (registry key).
    pub name: String,
    /// X axis title.
    pub title_x: String,
    /// Y axis title.
    pub title_y: String,
    /// Bin edges, strictly increasing (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents (sum of weights per bin).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin, for statistical errors. Never
    /// dropped when rescaling.
    pub sumw2: Vec<f64>,
    /// Total filled weight (in-range entries only).
    pub sum_of_weights: f64,
    /// Number of in-range fill calls.
    pub entries: u64,
    /// Whether bin-width normalization has been applied.
    pub normalized: bool,
    /// Under/overflow policy.
    #[serde(skip)]
    pub flow_policy: FlowPolicy,
}

impl Histogram {
    /// Create an empty histogram, validating the edges.
    pub fn new(
        name: impl Into<String>,
        bin_edges: Vec<f64>,
        title_x: impl Into<String>,
        title_y: impl Into<String>,
        flow_policy: FlowPolicy,
    ) -> Result<Self> {
        let name = name.into();
        if bin_edges.len() < 2 {
            return Err(Error::BadBinning {
                name,
                reason: format!("need at least 2 edges, got {}", bin_edges.len()),
            });
        }
        if !bin_edges.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::BadBinning {
                name,
                reason: "edges must be strictly increasing".into(),
            });
        }
        let n_bins = bin_edges.len() - 1;
        Ok(Self {
            name,
            title_x: title_x.into(),
            title_y: title_y.into(),
            bin_edges,
            bin_content: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            sum_of_weights: 0.0,
            entries: 0,
            normalized: false,
            flow_policy,
        })
    }

    /// Number of bins (excluding under/overflow).
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Width of bin `i`.
    pub fn bin_width(&self, i: usize) -> f64 {
        self.bin_edges[i + 1] - self.bin_edges[i]
    }

    /// Statistical error of bin `i` (sqrt of the summed squared weights).
    pub fn bin_error(&self, i: usize) -> f64 {
        self.sumw2[i].sqrt()
    }

    /// Add `weight` to the bin containing `value`.
    ///
    /// Out-of-range values follow the flow policy: dropped, or folded into
    /// the edge bins.
    pub(crate) fn fill(&mut self, value: f64, weight: f64) {
        let n_bins = self.n_bins();
        let bin = if value < self.bin_edges[0] {
            match self.flow_policy {
                FlowPolicy::Drop => return,
                FlowPolicy::Fold => 0,
            }
        } else if value >= self.bin_edges[n_bins] {
            match self.flow_policy {
                FlowPolicy::Drop => return,
                FlowPolicy::Fold => n_bins - 1,
            }
        } else {
            match find_bin(&self.bin_edges, value) {
                Some(b) => b,
                None => return,
            }
        };

        self.bin_content[bin] += weight;
        self.sumw2[bin] += weight * weight;
        self.sum_of_weights += weight;
        self.entries += 1;
    }

    /// Divide each bin's content by its width, and its sumw2 by the width
    /// squared (so the derived error divides by the width).
    pub(crate) fn normalize_to_bin_width(&mut self) {
        for i in 0..self.n_bins() {
            let width = self.bin_width(i);
            self.bin_content[i] /= width;
            self.sumw2[i] /= width * width;
        }
        self.normalized = true;
    }
}

/// Bin edges for `n` uniform bins over [`lo`, `hi`).
pub fn uniform_edges(n: usize, lo: f64, hi: f64) -> Vec<f64> {
    let step = (hi - lo) / n as f64;
    (0..=n).map(|i| lo + step * i as f64).collect()
}

/// Index of the bin containing `val`.
///
/// Edges are validated strictly increasing at construction. Values outside
/// `[first, last)` — NaN included — get `None`.
fn find_bin(edges: &[f64], val: f64) -> Option<usize> {
    if val.is_nan() || val < edges[0] || val >= edges[edges.len() - 1] {
        return None;
    }
    // Count of edges at or below val; the containing bin is one less. The
    // guard above keeps the count >= 1.
    let upper = edges.partition_point(|e| *e <= val);
    Some(upper - 1)
}

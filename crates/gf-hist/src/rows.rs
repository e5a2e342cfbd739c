//! Filling the standard histogram set from a stream of flat rows.

use gf_core::{FlatRow, Result};

use crate::histogram::{uniform_edges, FlowPolicy};
use crate::registry::HistRegistry;

/// Leading-candidate pt histogram name.
pub const HIST_LEAD_PT: &str = "lead_pt";
/// Leading-candidate charge histogram name.
pub const HIST_LEAD_CHARGE: &str = "lead_charge";
/// Candidate-multiplicity histogram name.
pub const HIST_N_CAND: &str = "n_candidates";

/// Book the default reporting set: leading pt, leading charge, multiplicity.
pub fn book_default_hists(registry: &mut HistRegistry) -> Result<()> {
    registry.book(
        HIST_LEAD_PT,
        uniform_edges(20, 0.0, 100.0),
        "p_{T}^{lead} [GeV]",
        "Events / bin",
        FlowPolicy::Drop,
    )?;
    registry.book(
        HIST_LEAD_CHARGE,
        uniform_edges(3, -1.5, 1.5),
        "charge (lead)",
        "Events / bin",
        FlowPolicy::Drop,
    )?;
    registry.book(
        HIST_N_CAND,
        uniform_edges(11, -0.5, 10.5),
        "N_{cand}",
        "Events / bin",
        FlowPolicy::Drop,
    )?;
    Ok(())
}

/// Fill the default histogram set from a row stream with a per-event scalar
/// weight.
///
/// `keep` is the injected event-selection predicate; rows it rejects feed
/// nothing. Returns the number of selected rows.
pub fn fill_flat_rows<I, F>(
    registry: &mut HistRegistry,
    rows: I,
    weight: f64,
    mut keep: F,
) -> Result<usize>
where
    I: IntoIterator<Item = FlatRow>,
    F: FnMut(&FlatRow) -> bool,
{
    let mut selected = 0usize;
    for row in rows {
        if !keep(&row) {
            continue;
        }
        registry.fill(HIST_LEAD_PT, row.lead_pt, weight)?;
        registry.fill(HIST_LEAD_CHARGE, row.lead_charge, weight)?;
        registry.fill(HIST_N_CAND, f64::from(row.n_candidates), weight)?;
        selected += 1;
    }
    Ok(selected)
}

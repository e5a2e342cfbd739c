//! Hard-process candidate selection and ranking.

use gf_core::Result;

use crate::event::EventRecord;
use crate::resolve::resolve_final_state;

/// Outcome of candidate selection for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Arena index of the highest-pt resolved final, if any candidate
    /// survived the filters.
    pub best: Option<usize>,
    /// Number of resolved finals after deduplication. This, not the
    /// pre-resolution count, is the reported multiplicity.
    pub count: usize,
}

/// Select candidates of species `type_code` from one event.
///
/// Filters to hard-process particles with `|pdg| == type_code`, resolves
/// each to its final state, deduplicates finals reached from multiple
/// starting legs, and ranks by transverse momentum descending. Exact-pt ties
/// keep arena order (stable sort). An empty result is a valid physical
/// outcome, represented as `best: None, count: 0` — never an error.
pub fn select(event: &EventRecord, type_code: u32) -> Result<Selection> {
    let mut finals: Vec<usize> = Vec::new();
    for (idx, particle) in event.particles.iter().enumerate() {
        if !particle.is_hard_process {
            continue;
        }
        if particle.pdg_id.unsigned_abs() != type_code {
            continue;
        }
        let resolved = resolve_final_state(event, idx)?;
        // Two starting legs can share a terminal object; count it once.
        if !finals.contains(&resolved) {
            finals.push(resolved);
        }
    }

    finals.sort_by(|a, b| {
        let pt_a = event.particles[*a].p4.pt();
        let pt_b = event.particles[*b].p4.pt();
        pt_b.total_cmp(&pt_a)
    });

    Ok(Selection { best: finals.first().copied(), count: finals.len() })
}

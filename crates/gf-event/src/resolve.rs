//! Final-state resolution of decay chains.

use gf_core::{Error, Result};

use crate::event::EventRecord;

/// Defensive hop bound for chain walking. Decay chains are trees of bounded
/// depth; hitting this bound means the graph has a cycle or is otherwise
/// malformed.
pub const MAX_RESOLVE_HOPS: usize = 10_000;

/// Walk a particle's decay chain to its final-state descendant.
///
/// A particle is non-final iff it has exactly one daughter with the same pdg
/// code — the generator's self-replacement bookkeeping copy. Resolution hops
/// to that daughter and repeats; it stops at zero daughters, multiple
/// daughters, or a type-changing daughter. Pure: the event is not mutated.
///
/// Returns the arena index of the final state, or
/// [`Error::MalformedGraph`] if the chain exceeds [`MAX_RESOLVE_HOPS`] or a
/// daughter index points outside the event.
pub fn resolve_final_state(event: &EventRecord, start: usize) -> Result<usize> {
    let mut current = start;
    let mut pdg_id = match event.particle(current) {
        Some(p) => p.pdg_id,
        None => {
            return Err(Error::MalformedGraph { event_index: event.index, pdg_id: 0, hops: 0 })
        }
    };

    for hops in 0..MAX_RESOLVE_HOPS {
        let particle = match event.particle(current) {
            Some(p) => p,
            None => {
                return Err(Error::MalformedGraph { event_index: event.index, pdg_id, hops })
            }
        };
        pdg_id = particle.pdg_id;

        match particle.daughters.as_slice() {
            [only] => {
                let same_type = event.particle(*only).map(|d| d.pdg_id == particle.pdg_id);
                match same_type {
                    Some(true) => current = *only,
                    Some(false) => return Ok(current),
                    None => {
                        return Err(Error::MalformedGraph {
                            event_index: event.index,
                            pdg_id,
                            hops,
                        })
                    }
                }
            }
            _ => return Ok(current),
        }
    }

    Err(Error::MalformedGraph { event_index: event.index, pdg_id, hops: MAX_RESOLVE_HOPS })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ParticleRecord;
    use gf_core::FourMomentum;

    fn particle(pdg_id: i32, daughters: Vec<usize>) -> ParticleRecord {
        ParticleRecord {
            pdg_id,
            status: 2,
            is_hard_process: false,
            p4: FourMomentum::new(1.0, 0.0, 0.0, 1.0),
            daughters,
            mothers: vec![],
        }
    }

    #[test]
    fn resolves_same_id_chain_to_terminal() {
        // 0 -> 1 -> 2 (all pdg 15), 2 decays into two different daughters.
        let ev = EventRecord::new(
            0,
            vec![
                particle(15, vec![1]),
                particle(15, vec![2]),
                particle(15, vec![3, 4]),
                particle(16, vec![]),
                particle(-211, vec![]),
            ],
        );
        assert_eq!(resolve_final_state(&ev, 0).unwrap(), 2);
        // Idempotent: resolving the result returns itself.
        assert_eq!(resolve_final_state(&ev, 2).unwrap(), 2);
    }

    #[test]
    fn type_changing_single_daughter_is_final() {
        let ev = EventRecord::new(0, vec![particle(15, vec![1]), particle(16, vec![])]);
        assert_eq!(resolve_final_state(&ev, 0).unwrap(), 0);
    }

    #[test]
    fn no_daughters_is_final() {
        let ev = EventRecord::new(0, vec![particle(15, vec![])]);
        assert_eq!(resolve_final_state(&ev, 0).unwrap(), 0);
    }

    #[test]
    fn cycle_reports_malformed_graph() {
        // 0 -> 1 -> 0, same pdg code: never terminates without the bound.
        let ev = EventRecord::new(3, vec![particle(15, vec![1]), particle(15, vec![0])]);
        match resolve_final_state(&ev, 0) {
            Err(Error::MalformedGraph { event_index, pdg_id, hops }) => {
                assert_eq!(event_index, 3);
                assert_eq!(pdg_id, 15);
                assert_eq!(hops, MAX_RESOLVE_HOPS);
            }
            other => panic!("expected MalformedGraph, got {other:?}"),
        }
    }

    #[test]
    fn dangling_daughter_reports_malformed_graph() {
        let ev = EventRecord::new(5, vec![particle(15, vec![99])]);
        match resolve_final_state(&ev, 0) {
            Err(Error::MalformedGraph { event_index, pdg_id, .. }) => {
                assert_eq!(event_index, 5);
                assert_eq!(pdg_id, 15);
            }
            other => panic!("expected MalformedGraph, got {other:?}"),
        }
    }
}

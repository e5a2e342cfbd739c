//! Per-event flattening into the fixed output row schema.

use gf_core::{ChargeConvention, Error, FlatRow, Result};

use crate::event::EventRecord;
use crate::select::select;

/// Flattens events into [`FlatRow`]s for one configured particle species.
///
/// The species to search for and the pdg → charge-sign table are caller
/// configuration, validated once at construction. Processes one event at a
/// time and never mutates its input.
#[derive(Debug, Clone)]
pub struct Flattener {
    type_code: u32,
    charges: ChargeConvention,
}

impl Flattener {
    /// Build a flattener for `type_code`, validating that the charge table
    /// covers it.
    pub fn new(type_code: u32, charges: ChargeConvention) -> Result<Self> {
        charges.validate(type_code)?;
        Ok(Self { type_code, charges })
    }

    /// The configured species.
    pub fn type_code(&self) -> u32 {
        self.type_code
    }

    /// Reduce one event to its flat row.
    ///
    /// With no surviving candidate the four kinematic fields carry the 0.0
    /// sentinel; `n_candidates` is always the selector's post-resolution
    /// count.
    pub fn flatten(&self, event: &EventRecord) -> Result<FlatRow> {
        let selection = select(event, self.type_code)?;

        let mut row = FlatRow::empty();
        row.n_candidates = selection.count as u32;

        if let Some(best) = selection.best {
            let particle = &event.particles[best];
            row.lead_pt = particle.p4.pt();
            row.lead_eta = particle.p4.eta();
            row.lead_phi = particle.p4.phi();
            row.lead_e = particle.p4.e;
            row.lead_charge = self.charges.charge(particle.pdg_id).ok_or_else(|| {
                Error::ChargeConvention(format!(
                    "event {}: no charge sign for pdg {}",
                    event.index, particle.pdg_id
                ))
            })?;
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ParticleRecord;
    use approx::assert_relative_eq;
    use gf_core::FourMomentum;

    fn tau(pdg_id: i32, pt: f64) -> ParticleRecord {
        ParticleRecord {
            pdg_id,
            status: 2,
            is_hard_process: true,
            p4: FourMomentum::from_pt_eta_phi_e(pt, 0.4, 1.1, pt * 1.2),
            daughters: vec![],
            mothers: vec![],
        }
    }

    fn flattener() -> Flattener {
        Flattener::new(15, ChargeConvention::charged_leptons()).unwrap()
    }

    #[test]
    fn no_candidate_yields_sentinel_row() {
        let ev = EventRecord::new(0, vec![]);
        let row = flattener().flatten(&ev).unwrap();
        assert_eq!(row, FlatRow::empty());
    }

    #[test]
    fn leading_candidate_fills_kinematics_and_charge() {
        let ev = EventRecord::new(0, vec![tau(15, 50.0), tau(-15, 30.0)]);
        let row = flattener().flatten(&ev).unwrap();
        assert_relative_eq!(row.lead_pt, 50.0, max_relative = 1e-12);
        assert_relative_eq!(row.lead_eta, 0.4, max_relative = 1e-12);
        assert_relative_eq!(row.lead_phi, 1.1, max_relative = 1e-12);
        assert_relative_eq!(row.lead_e, 60.0, max_relative = 1e-12);
        assert_eq!(row.lead_charge, -1.0);
        assert_eq!(row.n_candidates, 2);
    }

    #[test]
    fn negative_pdg_code_gets_positive_charge() {
        let ev = EventRecord::new(0, vec![tau(-15, 42.0)]);
        let row = flattener().flatten(&ev).unwrap();
        assert_eq!(row.lead_charge, 1.0);
        assert_eq!(row.n_candidates, 1);
    }

    #[test]
    fn uncovered_species_is_rejected_at_construction() {
        assert!(Flattener::new(2212, ChargeConvention::charged_leptons()).is_err());
    }

    #[test]
    fn does_not_mutate_the_event() {
        let ev = EventRecord::new(0, vec![tau(15, 50.0)]);
        let before = serde_json::to_string(&ev).unwrap();
        let _ = flattener().flatten(&ev).unwrap();
        assert_eq!(serde_json::to_string(&ev).unwrap(), before);
    }
}

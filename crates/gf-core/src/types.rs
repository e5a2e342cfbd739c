//! Common data types for genflat

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pseudorapidity assigned to momenta exactly along the beam axis, where
/// the true value diverges.
pub const ETA_CLAMP: f64 = 1e10;

/// A 4-momentum in Cartesian components (GeV).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    /// x momentum component.
    pub px: f64,
    /// y momentum component.
    pub py: f64,
    /// z momentum component (beam axis).
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl FourMomentum {
    /// Build from Cartesian components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build from collider coordinates (pt, eta, phi, E).
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self { px: pt * phi.cos(), py: pt * phi.sin(), pz: pt * eta.sinh(), e }
    }

    /// Transverse momentum, the magnitude of (px, py).
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity.
    ///
    /// Kept finite for degenerate inputs so rows always survive JSON
    /// serialization: a zero momentum vector gives 0.0, and momenta along
    /// the beam axis clamp to ±[`ETA_CLAMP`].
    pub fn eta(&self) -> f64 {
        let p = (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt();
        if p == 0.0 {
            return 0.0;
        }
        if p - self.pz <= 0.0 {
            return ETA_CLAMP;
        }
        if p + self.pz <= 0.0 {
            return -ETA_CLAMP;
        }
        0.5 * ((p + self.pz) / (p - self.pz)).ln()
    }

    /// Azimuthal angle in (−π, π].
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }
}

/// One flattened event: the leading candidate's kinematics plus the
/// candidate multiplicity.
///
/// The serde field names are the on-disk row schema and must stay stable
/// within a pipeline run. All four `lead_*` kinematic fields are 0.0 when
/// `n_candidates` would otherwise leave them unset — the documented
/// no-candidate sentinel, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Leading-candidate transverse momentum (0.0 sentinel if none).
    pub lead_pt: f64,
    /// Leading-candidate pseudorapidity (0.0 sentinel if none).
    pub lead_eta: f64,
    /// Leading-candidate azimuthal angle (0.0 sentinel if none).
    pub lead_phi: f64,
    /// Leading-candidate energy (0.0 sentinel if none).
    pub lead_e: f64,
    /// Leading-candidate charge sign (±1.0; 0.0 sentinel if none).
    pub lead_charge: f64,
    /// Number of resolved final-state candidates in the event.
    pub n_candidates: u32,
}

impl FlatRow {
    /// The all-sentinel row for an event with no candidate.
    pub fn empty() -> Self {
        Self {
            lead_pt: 0.0,
            lead_eta: 0.0,
            lead_phi: 0.0,
            lead_e: 0.0,
            lead_charge: 0.0,
            n_candidates: 0,
        }
    }
}

/// Injected pdg-code → charge-sign table.
///
/// Keys are absolute pdg codes; values are the unit charge of the
/// *positive*-code state. The negative-code state gets the opposite sign,
/// mirroring the generator convention for charged leptons (pdg +15 is the
/// τ⁻, so `signs[15] == -1.0`).
#[derive(Debug, Clone)]
pub struct ChargeConvention {
    signs: HashMap<u32, f64>,
}

impl ChargeConvention {
    /// Build from an explicit table. Validated by [`Self::validate`] when a
    /// flattener is constructed.
    pub fn new(signs: HashMap<u32, f64>) -> Self {
        Self { signs }
    }

    /// The charged leptons: e, μ, τ. Positive code is the negative lepton.
    pub fn charged_leptons() -> Self {
        Self { signs: HashMap::from([(11, -1.0), (13, -1.0), (15, -1.0)]) }
    }

    /// Check that `type_code` is covered and that every entry is a unit
    /// charge.
    pub fn validate(&self, type_code: u32) -> Result<()> {
        if !self.signs.contains_key(&type_code) {
            return Err(Error::ChargeConvention(format!(
                "no charge sign configured for pdg |{type_code}|"
            )));
        }
        for (code, sign) in &self.signs {
            if sign.abs() != 1.0 {
                return Err(Error::ChargeConvention(format!(
                    "charge for pdg |{code}| must be ±1.0, got {sign}"
                )));
            }
        }
        Ok(())
    }

    /// Charge sign of a signed pdg code, or `None` if the species is not in
    /// the table.
    pub fn charge(&self, pdg_id: i32) -> Option<f64> {
        let sign = self.signs.get(&pdg_id.unsigned_abs())?;
        Some(if pdg_id >= 0 { *sign } else { -*sign })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pt_eta_phi_round_trip() {
        let p = FourMomentum::from_pt_eta_phi_e(50.0, 1.2, -0.7, 80.0);
        assert_relative_eq!(p.pt(), 50.0, max_relative = 1e-12);
        assert_relative_eq!(p.eta(), 1.2, max_relative = 1e-12);
        assert_relative_eq!(p.phi(), -0.7, max_relative = 1e-12);
        assert_eq!(p.e, 80.0);
    }

    #[test]
    fn eta_stays_finite_for_degenerate_momenta() {
        assert_eq!(FourMomentum::new(0.0, 0.0, 0.0, 0.0).eta(), 0.0);
        assert_eq!(FourMomentum::new(0.0, 0.0, 5.0, 5.0).eta(), ETA_CLAMP);
        assert_eq!(FourMomentum::new(0.0, 0.0, -5.0, 5.0).eta(), -ETA_CLAMP);
    }

    #[test]
    fn beam_axis_row_survives_json_round_trip() {
        // A non-finite lead_eta would serialize as JSON null and break the
        // row stream at read-back time.
        let p = FourMomentum::new(0.0, 0.0, 5.0, 5.0);
        let row = FlatRow { lead_eta: p.eta(), n_candidates: 1, ..FlatRow::empty() };
        let json = serde_json::to_string(&row).unwrap();
        let back: FlatRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lead_eta, ETA_CLAMP);
    }

    #[test]
    fn charge_convention_signs() {
        let conv = ChargeConvention::charged_leptons();
        assert_eq!(conv.charge(15), Some(-1.0));
        assert_eq!(conv.charge(-15), Some(1.0));
        assert_eq!(conv.charge(13), Some(-1.0));
        assert_eq!(conv.charge(2212), None);
    }

    #[test]
    fn charge_convention_validation() {
        let conv = ChargeConvention::charged_leptons();
        assert!(conv.validate(15).is_ok());
        assert!(conv.validate(2212).is_err());

        let bad = ChargeConvention::new(HashMap::from([(15, -2.0)]));
        assert!(bad.validate(15).is_err());
    }

    #[test]
    fn flat_row_schema_is_stable() {
        let row = FlatRow::empty();
        let json = serde_json::to_value(row).unwrap();
        for field in ["lead_pt", "lead_eta", "lead_phi", "lead_e", "lead_charge", "n_candidates"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}

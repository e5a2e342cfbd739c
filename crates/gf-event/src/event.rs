//! Event-scoped particle arena.
//!
//! Decay links are `usize` indices into the owning event's particle vector,
//! both in memory and on the wire. Index-based links avoid ownership cycles
//! and give O(1) daughter lookup; a dangling index is reported during
//! resolution as a malformed graph rather than panicking.

use serde::{Deserialize, Serialize};

use gf_core::FourMomentum;

/// One generator-level particle within a single event.
///
/// A particle with exactly one daughter of identical pdg code is a
/// bookkeeping radiation/mixing copy, not a distinct physical state; see
/// [`crate::resolve::resolve_final_state`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleRecord {
    /// Signed pdg code.
    pub pdg_id: i32,
    /// Generator status code.
    #[serde(default)]
    pub status: i32,
    /// Whether the generator flagged this particle as part of the hard
    /// process.
    #[serde(default)]
    pub is_hard_process: bool,
    /// Kinematic 4-vector.
    #[serde(flatten)]
    pub p4: FourMomentum,
    /// Daughter indices within the same event.
    #[serde(default)]
    pub daughters: Vec<usize>,
    /// Mother indices within the same event.
    #[serde(default)]
    pub mothers: Vec<usize>,
}

/// An ordered collection of particles plus the source-assigned event index.
///
/// Transient: exists only while one event is being processed, and is never
/// persisted whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic, source-assigned event index.
    pub index: u64,
    /// The event's particles, in source order.
    pub particles: Vec<ParticleRecord>,
}

impl EventRecord {
    /// Build an event from its particles.
    pub fn new(index: u64, particles: Vec<ParticleRecord>) -> Self {
        Self { index, particles }
    }

    /// The particle at `idx`, or `None` if the index dangles.
    pub fn particle(&self, idx: usize) -> Option<&ParticleRecord> {
        self.particles.get(idx)
    }

    /// Number of particles in the event.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the event holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_wire_format_defaults() {
        // Optional fields may be omitted on the wire.
        let p: ParticleRecord =
            serde_json::from_str(r#"{"pdg_id":15,"px":1.0,"py":2.0,"pz":3.0,"e":4.0}"#).unwrap();
        assert_eq!(p.pdg_id, 15);
        assert!(!p.is_hard_process);
        assert!(p.daughters.is_empty());
        assert!(p.mothers.is_empty());
        assert_eq!(p.p4.e, 4.0);
    }

    #[test]
    fn event_round_trips_through_json() {
        let ev = EventRecord::new(
            7,
            vec![ParticleRecord {
                pdg_id: -15,
                status: 2,
                is_hard_process: true,
                p4: FourMomentum::new(3.0, 4.0, 0.0, 5.0),
                daughters: vec![],
                mothers: vec![],
            }],
        );
        let json = serde_json::to_string(&ev).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 7);
        assert_eq!(back.particles.len(), 1);
        assert_eq!(back.particles[0].pdg_id, -15);
        assert_eq!(back.particles[0].p4.pt(), 5.0);
    }
}

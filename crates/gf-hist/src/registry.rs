//! Histogram registry with an explicit book → fill → finalize lifecycle.

use gf_core::{Error, Result};

use crate::histogram::{FlowPolicy, Histogram};

/// Owns all histograms of one aggregation pass.
///
/// Booking happens once, up front; fills stream in afterwards; a histogram
/// becomes read-only the moment it is normalized. No external writer can
/// touch bin contents directly. Booking order is preserved for
/// deterministic artifact output.
#[derive(Debug, Default)]
pub struct HistRegistry {
    hists: Vec<Histogram>,
}

impl HistRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a histogram under a unique name.
    pub fn book(
        &mut self,
        name: &str,
        bin_edges: Vec<f64>,
        title_x: &str,
        title_y: &str,
        flow_policy: FlowPolicy,
    ) -> Result<()> {
        if self.hists.iter().any(|h| h.name == name) {
            return Err(Error::DuplicateHistogram { name: name.to_string() });
        }
        self.hists.push(Histogram::new(name, bin_edges, title_x, title_y, flow_policy)?);
        Ok(())
    }

    /// Add `weight` to the bin of `name` containing `value`.
    ///
    /// Out-of-range values follow the histogram's flow policy. Filling a
    /// normalized histogram is caller misuse and fails.
    pub fn fill(&mut self, name: &str, value: f64, weight: f64) -> Result<()> {
        let hist = self.get_mut(name)?;
        if hist.normalized {
            return Err(Error::AlreadyNormalized { name: name.to_string() });
        }
        hist.fill(value, weight);
        Ok(())
    }

    /// Normalize `name` to bin width. At most once per histogram; a second
    /// call would silently double-divide and therefore fails instead.
    pub fn normalize_to_bin_width(&mut self, name: &str) -> Result<()> {
        let hist = self.get_mut(name)?;
        if hist.normalized {
            return Err(Error::AlreadyNormalized { name: name.to_string() });
        }
        hist.normalize_to_bin_width();
        Ok(())
    }

    /// Read access by name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.hists.iter().find(|h| h.name == name)
    }

    /// All histograms in booking order.
    pub fn iter(&self) -> impl Iterator<Item = &Histogram> {
        self.hists.iter()
    }

    /// Number of booked histograms.
    pub fn len(&self) -> usize {
        self.hists.len()
    }

    /// Whether nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.hists.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Histogram> {
        self.hists
            .iter_mut()
            .find(|h| h.name == name)
            .ok_or_else(|| Error::UnknownHistogram { name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked() -> HistRegistry {
        let mut reg = HistRegistry::new();
        reg.book("h", vec![0.0, 10.0, 20.0], "x", "Events / bin", FlowPolicy::Drop).unwrap();
        reg
    }

    #[test]
    fn duplicate_booking_fails() {
        let mut reg = booked();
        let err = reg.book("h", vec![0.0, 1.0], "x", "y", FlowPolicy::Drop).unwrap_err();
        assert!(matches!(err, Error::DuplicateHistogram { .. }));
    }

    #[test]
    fn fill_and_normalize_lifecycle() {
        let mut reg = booked();
        reg.fill("h", 5.0, 2.0).unwrap();
        reg.fill("h", 15.0, 3.0).unwrap();
        reg.normalize_to_bin_width("h").unwrap();
        let h = reg.get("h").unwrap();
        assert_eq!(h.bin_content, vec![0.2, 0.3]);
    }

    #[test]
    fn second_normalization_fails() {
        let mut reg = booked();
        reg.normalize_to_bin_width("h").unwrap();
        let err = reg.normalize_to_bin_width("h").unwrap_err();
        assert!(matches!(err, Error::AlreadyNormalized { .. }));
    }

    #[test]
    fn fill_after_normalization_fails() {
        let mut reg = booked();
        reg.normalize_to_bin_width("h").unwrap();
        let err = reg.fill("h", 5.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::AlreadyNormalized { .. }));
    }

    #[test]
    fn nan_fill_is_a_silent_drop_not_a_panic() {
        let mut reg = booked();
        reg.fill("h", f64::NAN, 1.0).unwrap();
        assert_eq!(reg.get("h").unwrap().entries, 0);
    }

    #[test]
    fn unknown_name_fails() {
        let mut reg = booked();
        assert!(matches!(reg.fill("nope", 1.0, 1.0), Err(Error::UnknownHistogram { .. })));
        assert!(matches!(
            reg.normalize_to_bin_width("nope"),
            Err(Error::UnknownHistogram { .. })
        ));
    }

    #[test]
    fn iteration_preserves_booking_order() {
        let mut reg = booked();
        reg.book("a", vec![0.0, 1.0], "", "", FlowPolicy::Drop).unwrap();
        let names: Vec<&str> = reg.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["h", "a"]);
    }
}

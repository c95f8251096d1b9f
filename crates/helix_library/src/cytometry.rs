//! Cytometry measurements attached to library gates.
//!
//! Each gate may carry flow-cytometry output distributions measured at a set
//! of input activity levels. The search core does not evaluate these; they
//! ride along on the gate so downstream stages can report predicted output
//! distributions.

use serde::{Deserialize, Serialize};

/// A measured output distribution at one input level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges in output activity units, ascending.
    pub bins: Vec<f64>,
    /// Normalized counts, one per bin.
    pub counts: Vec<f64>,
}

/// Cytometry data for one gate: an output histogram per measured input level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cytometry {
    data: Vec<(f64, Histogram)>,
}

impl Cytometry {
    /// Creates cytometry data from (input level, histogram) pairs.
    pub fn new(data: Vec<(f64, Histogram)>) -> Self {
        Self { data }
    }

    /// Returns the measured input levels, in insertion order.
    pub fn inputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|(input, _)| *input)
    }

    /// Returns the histogram measured at exactly the given input level.
    pub fn histogram_at(&self, input: f64) -> Option<&Histogram> {
        self.data
            .iter()
            .find(|(measured, _)| *measured == input)
            .map(|(_, h)| h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cytometry {
        Cytometry::new(vec![
            (
                0.01,
                Histogram {
                    bins: vec![0.0, 1.0, 2.0],
                    counts: vec![0.7, 0.3],
                },
            ),
            (
                1.0,
                Histogram {
                    bins: vec![0.0, 1.0, 2.0],
                    counts: vec![0.1, 0.9],
                },
            ),
        ])
    }

    #[test]
    fn lookup_by_input() {
        let c = sample();
        assert_eq!(c.histogram_at(1.0).unwrap().counts, vec![0.1, 0.9]);
        assert!(c.histogram_at(0.5).is_none());
    }

    #[test]
    fn inputs_in_order() {
        let c = sample();
        let inputs: Vec<f64> = c.inputs().collect();
        assert_eq!(inputs, vec![0.01, 1.0]);
    }
}

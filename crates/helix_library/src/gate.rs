//! Library gate definitions.

use crate::curve::Curve;
use crate::cytometry::Cytometry;
use crate::part::Part;
use crate::toxicity::ToxicityTable;
use serde::{Deserialize, Serialize};

/// What a gate does in a mapped circuit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GateRole {
    /// A repressor implementing a logic node.
    Logic,
    /// A sensor driving a circuit input.
    InputSensor,
    /// A reporter read out at a circuit output.
    OutputReporter,
}

/// A physical gate from the library.
///
/// Logic gates belong to an exclusivity group (typically the repressor
/// protein family): at most one gate from a group may appear in a mapped
/// circuit, because two promoters repressed by the same protein would
/// cross-talk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Unique gate name.
    pub name: String,
    /// Exclusivity group the gate belongs to.
    pub group: String,
    /// Role the gate plays in a circuit.
    pub role: GateRole,
    /// Response curve mapping summed input activity to output activity.
    pub response: Curve,
    /// The gate's own DNA parts (ribozyme, RBS, CDS, terminator), in
    /// physical order, excluding the upstream-driven promoters.
    pub parts: Vec<Part>,
    /// The output promoter this gate drives, if it has one. Sensors and
    /// logic gates do; reporters do not.
    pub promoter: Option<Part>,
    /// Relative growth measurements, if the gate was assayed for toxicity.
    pub toxicity: Option<ToxicityTable>,
    /// Flow-cytometry output distributions, if measured.
    pub cytometry: Option<Cytometry>,
}

impl Gate {
    /// Creates a logic repressor gate.
    pub fn logic(
        name: impl Into<String>,
        group: impl Into<String>,
        response: Curve,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            role: GateRole::Logic,
            response,
            parts: Vec::new(),
            promoter: None,
            toxicity: None,
            cytometry: None,
        }
    }

    /// Creates an input sensor. Sensors pass their reference activity
    /// through unchanged, so the response is the identity.
    pub fn input_sensor(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            group: name.clone(),
            name,
            role: GateRole::InputSensor,
            response: Curve::identity(),
            parts: Vec::new(),
            promoter: None,
            toxicity: None,
            cytometry: None,
        }
    }

    /// Creates an output reporter with a unit-conversion response.
    pub fn output_reporter(name: impl Into<String>, slope: f64) -> Self {
        let name = name.into();
        Self {
            group: name.clone(),
            name,
            role: GateRole::OutputReporter,
            response: Curve::unit_conversion(slope),
            parts: Vec::new(),
            promoter: None,
            toxicity: None,
            cytometry: None,
        }
    }

    /// Attaches the gate's own DNA parts.
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    /// Attaches the gate's output promoter.
    pub fn with_promoter(mut self, promoter: Part) -> Self {
        self.promoter = Some(promoter);
        self
    }

    /// Attaches a toxicity table.
    pub fn with_toxicity(mut self, toxicity: ToxicityTable) -> Self {
        self.toxicity = Some(toxicity);
        self
    }

    /// Attaches cytometry data.
    pub fn with_cytometry(mut self, cytometry: Cytometry) -> Self {
        self.cytometry = Some(cytometry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::PartKind;

    #[test]
    fn sensor_is_identity() {
        let sensor = Gate::input_sensor("LacI_sensor");
        assert_eq!(sensor.role, GateRole::InputSensor);
        assert_eq!(sensor.response.apply(0.003), 0.003);
        assert_eq!(sensor.group, "LacI_sensor");
    }

    #[test]
    fn reporter_scales_by_slope() {
        let reporter = Gate::output_reporter("YFP", 64.0);
        assert_eq!(reporter.role, GateRole::OutputReporter);
        assert_eq!(reporter.response.apply(1.5), 96.0);
    }

    #[test]
    fn logic_gate_builder() {
        let gate = Gate::logic(
            "P3_PhlF",
            "PhlF",
            Curve::Hill {
                ymax: 3.9,
                ymin: 0.01,
                k: 0.03,
                n: 4.0,
            },
        )
        .with_promoter(Part::new("pPhlF", PartKind::Promoter))
        .with_parts(vec![
            Part::new("RiboJ53", PartKind::Ribozyme),
            Part::new("P3", PartKind::Rbs),
            Part::new("PhlF", PartKind::Cds),
            Part::new("ECK120033737", PartKind::Terminator),
        ]);
        assert_eq!(gate.role, GateRole::Logic);
        assert_eq!(gate.group, "PhlF");
        assert_eq!(gate.parts.len(), 4);
        assert_eq!(gate.promoter.as_ref().unwrap().name, "pPhlF");
        assert!(gate.toxicity.is_none());
    }
}

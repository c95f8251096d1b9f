//! The gate library container.

use crate::gate::{Gate, GateRole};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while building or querying a gate library.
#[derive(Error, Debug, PartialEq)]
pub enum LibraryError {
    /// Two gates share a name.
    #[error("duplicate gate '{0}'")]
    DuplicateGate(String),
    /// A lookup referenced a gate name not in the library.
    #[error("unknown gate '{0}'")]
    UnknownGate(String),
    /// An input sensor has no reference promoter activities.
    #[error("input sensor '{0}' has no reference activities")]
    MissingInputReference(String),
    /// A toxicity table was constructed with no rows.
    #[error("toxicity table has no rows")]
    EmptyToxicityTable,
    /// A toxicity table row has a non-positive or non-finite input activity.
    #[error("toxicity table activity {0} is not strictly positive and finite")]
    InvalidToxicityActivity(f64),
    /// Toxicity activity and growth columns have different lengths.
    #[error("toxicity table has {activities} activities but {growth} growth values")]
    RaggedToxicityTable {
        /// Number of activity entries.
        activities: usize,
        /// Number of growth entries.
        growth: usize,
    },
}

/// Opaque, copyable ID for a gate in the library.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GateId(u32);

impl GateId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The immutable set of physical gates available for assignment.
///
/// Gates live in an arena indexed by [`GateId`]; a name index is kept
/// alongside and rebuilt after deserialization. The library also carries the
/// reference (off, on) promoter activities for each input sensor, and the
/// promoter names known to form roadblocks when stacked in tandem.
#[derive(Debug, Serialize, Deserialize)]
pub struct GateLibrary {
    gates: Vec<Gate>,
    #[serde(skip)]
    gate_by_name: HashMap<String, GateId>,
    /// Reference (off, on) activities per input sensor name.
    input_references: HashMap<String, (f64, f64)>,
    /// Sensor promoter names that participate in roadblocks.
    input_roadblocks: HashSet<String>,
    /// Logic promoter names that participate in roadblocks.
    logic_roadblocks: HashSet<String>,
}

impl GateLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self {
            gates: Vec::new(),
            gate_by_name: HashMap::new(),
            input_references: HashMap::new(),
            input_roadblocks: HashSet::new(),
            logic_roadblocks: HashSet::new(),
        }
    }

    /// Adds a gate, returning its ID. Gate names must be unique.
    pub fn add_gate(&mut self, gate: Gate) -> Result<GateId, LibraryError> {
        if self.gate_by_name.contains_key(&gate.name) {
            return Err(LibraryError::DuplicateGate(gate.name.clone()));
        }
        let id = GateId::from_raw(self.gates.len() as u32);
        self.gate_by_name.insert(gate.name.clone(), id);
        self.gates.push(gate);
        Ok(id)
    }

    /// Adds an input sensor together with its reference activities.
    pub fn add_input_sensor(
        &mut self,
        name: impl Into<String>,
        off: f64,
        on: f64,
    ) -> Result<GateId, LibraryError> {
        let name = name.into();
        self.input_references.insert(name.clone(), (off, on));
        self.add_gate(Gate::input_sensor(name))
    }

    /// Returns the gate with the given ID.
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.as_raw() as usize]
    }

    /// Looks up a gate ID by name.
    pub fn gate_id(&self, name: &str) -> Result<GateId, LibraryError> {
        self.gate_by_name
            .get(name)
            .copied()
            .ok_or_else(|| LibraryError::UnknownGate(name.to_string()))
    }

    /// Returns the number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the library holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Iterates over all (ID, gate) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates
            .iter()
            .enumerate()
            .map(|(i, g)| (GateId::from_raw(i as u32), g))
    }

    fn ids_with_role(&self, role: GateRole) -> Vec<GateId> {
        self.iter()
            .filter(|(_, g)| g.role == role)
            .map(|(id, _)| id)
            .collect()
    }

    /// IDs of all logic repressor gates, in insertion order.
    pub fn logic_gates(&self) -> Vec<GateId> {
        self.ids_with_role(GateRole::Logic)
    }

    /// IDs of all input sensors, in insertion order.
    pub fn input_sensors(&self) -> Vec<GateId> {
        self.ids_with_role(GateRole::InputSensor)
    }

    /// IDs of all output reporters, in insertion order.
    pub fn output_reporters(&self) -> Vec<GateId> {
        self.ids_with_role(GateRole::OutputReporter)
    }

    /// Returns the distinct exclusivity groups among logic gates.
    pub fn logic_groups(&self) -> HashSet<&str> {
        self.gates
            .iter()
            .filter(|g| g.role == GateRole::Logic)
            .map(|g| g.group.as_str())
            .collect()
    }

    /// Returns the reference (off, on) activities for an input sensor.
    pub fn input_reference(&self, name: &str) -> Result<(f64, f64), LibraryError> {
        self.input_references
            .get(name)
            .copied()
            .ok_or_else(|| LibraryError::MissingInputReference(name.to_string()))
    }

    /// Marks a sensor promoter as a roadblock participant.
    pub fn add_input_roadblock(&mut self, promoter: impl Into<String>) {
        self.input_roadblocks.insert(promoter.into());
    }

    /// Marks a logic promoter as a roadblock participant.
    pub fn add_logic_roadblock(&mut self, promoter: impl Into<String>) {
        self.logic_roadblocks.insert(promoter.into());
    }

    /// Returns `true` if the name is a roadblock-listed sensor promoter.
    pub fn is_input_roadblock(&self, promoter: &str) -> bool {
        self.input_roadblocks.contains(promoter)
    }

    /// Returns `true` if the name is a roadblock-listed logic promoter.
    pub fn is_logic_roadblock(&self, promoter: &str) -> bool {
        self.logic_roadblocks.contains(promoter)
    }

    /// Returns `true` if the named promoter participates in roadblocks,
    /// either as a sensor or a logic promoter.
    pub fn is_roadblock_promoter(&self, promoter: &str) -> bool {
        self.input_roadblocks.contains(promoter) || self.logic_roadblocks.contains(promoter)
    }

    /// Rebuilds the name index. Must be called after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.gate_by_name.clear();
        for (i, gate) in self.gates.iter().enumerate() {
            self.gate_by_name
                .insert(gate.name.clone(), GateId::from_raw(i as u32));
        }
    }
}

impl Default for GateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;

    fn hill() -> Curve {
        Curve::Hill {
            ymax: 3.0,
            ymin: 0.01,
            k: 0.1,
            n: 2.0,
        }
    }

    fn sample_library() -> GateLibrary {
        let mut lib = GateLibrary::new();
        lib.add_input_sensor("LacI_sensor", 0.003, 2.8).unwrap();
        lib.add_gate(Gate::output_reporter("YFP", 1.0)).unwrap();
        lib.add_gate(Gate::logic("A1_AmtR", "AmtR", hill())).unwrap();
        lib.add_gate(Gate::logic("P3_PhlF", "PhlF", hill())).unwrap();
        lib.add_gate(Gate::logic("P1_PhlF", "PhlF", hill())).unwrap();
        lib
    }

    #[test]
    fn role_sublists() {
        let lib = sample_library();
        assert_eq!(lib.input_sensors().len(), 1);
        assert_eq!(lib.output_reporters().len(), 1);
        assert_eq!(lib.logic_gates().len(), 3);
    }

    #[test]
    fn groups_are_distinct() {
        let lib = sample_library();
        let groups = lib.logic_groups();
        assert_eq!(groups.len(), 2);
        assert!(groups.contains("PhlF"));
        assert!(groups.contains("AmtR"));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut lib = sample_library();
        let err = lib.add_gate(Gate::logic("A1_AmtR", "AmtR", hill())).unwrap_err();
        assert_eq!(err, LibraryError::DuplicateGate("A1_AmtR".to_string()));
    }

    #[test]
    fn lookup_by_name() {
        let lib = sample_library();
        let id = lib.gate_id("P3_PhlF").unwrap();
        assert_eq!(lib.gate(id).group, "PhlF");
        assert!(lib.gate_id("missing").is_err());
    }

    #[test]
    fn input_reference_lookup() {
        let lib = sample_library();
        assert_eq!(lib.input_reference("LacI_sensor").unwrap(), (0.003, 2.8));
        assert!(matches!(
            lib.input_reference("YFP"),
            Err(LibraryError::MissingInputReference(_))
        ));
    }

    #[test]
    fn roadblock_promoters() {
        let mut lib = sample_library();
        lib.add_input_roadblock("pTac");
        lib.add_logic_roadblock("pPhlF");
        assert!(lib.is_roadblock_promoter("pTac"));
        assert!(lib.is_roadblock_promoter("pPhlF"));
        assert!(!lib.is_roadblock_promoter("pAmtR"));
    }

    #[test]
    fn serde_rebuilds_index() {
        let lib = sample_library();
        let json = serde_json::to_string(&lib).unwrap();
        let mut restored: GateLibrary = serde_json::from_str(&json).unwrap();
        restored.rebuild_indices();
        assert_eq!(restored.len(), lib.len());
        let id = restored.gate_id("P1_PhlF").unwrap();
        assert_eq!(restored.gate(id).name, "P1_PhlF");
    }
}

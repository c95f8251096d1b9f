//! The mutable assignment state the optimizer searches over.

use helix_library::{GateId, GateLibrary};
use helix_netlist::{Netlist, NodeId};

/// The role a node plays at the circuit boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeRole {
    /// A primary input (signal source).
    Source,
    /// A primary output (signal sink).
    Sink,
    /// An interior logic node.
    None,
}

/// Per-node search state: the assigned gate and the simulated vectors.
///
/// Each vector holds one value per truth-table row. Vectors are empty until
/// the corresponding simulator has run.
#[derive(Clone, Debug)]
pub struct TechNode {
    /// The netlist node this state belongs to.
    pub node: NodeId,
    /// The node's boundary role.
    pub role: NodeRole,
    /// The assigned library gate, if any.
    pub gate: Option<GateId>,
    /// Boolean logic value per truth-table row.
    pub logic: Vec<bool>,
    /// Promoter activity (RPU) per truth-table row.
    pub activity: Vec<f64>,
    /// Relative growth per truth-table row.
    pub toxicity: Vec<f64>,
}

/// One candidate assignment of library gates to netlist nodes.
///
/// Holds a [`TechNode`] per netlist node, indexed by [`NodeId`]. A fresh map
/// is built per trajectory and cloned per annealing step; only the winning
/// clone survives the search. Gate usage and group membership are queried
/// from this table, never tracked on the gates themselves, so any number of
/// maps can share one library.
#[derive(Clone, Debug)]
pub struct TechMap {
    nodes: Vec<TechNode>,
}

impl TechMap {
    /// Creates an unassigned map mirroring the netlist's nodes.
    pub fn new(netlist: &Netlist) -> Self {
        let nodes = netlist
            .nodes
            .iter()
            .map(|n| TechNode {
                node: n.id,
                role: if n.kind.is_input() {
                    NodeRole::Source
                } else if n.kind.is_output() {
                    NodeRole::Sink
                } else {
                    NodeRole::None
                },
                gate: None,
                logic: Vec::new(),
                activity: Vec::new(),
                toxicity: Vec::new(),
            })
            .collect();
        Self { nodes }
    }

    /// Returns the state for a node.
    pub fn node(&self, id: NodeId) -> &TechNode {
        &self.nodes[id.as_raw() as usize]
    }

    /// Returns the mutable state for a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut TechNode {
        &mut self.nodes[id.as_raw() as usize]
    }

    /// Returns the gate assigned to a node, if any.
    pub fn gate_of(&self, id: NodeId) -> Option<GateId> {
        self.node(id).gate
    }

    /// Iterates over all per-node states.
    pub fn iter(&self) -> impl Iterator<Item = &TechNode> {
        self.nodes.iter()
    }

    /// Returns the node currently holding the given gate, if any.
    pub fn user_of(&self, gate: GateId) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|tn| tn.gate == Some(gate))
            .map(|tn| tn.node)
    }

    /// Returns `true` if the gate is assigned to any node.
    pub fn gate_in_use(&self, gate: GateId) -> bool {
        self.user_of(gate).is_some()
    }

    /// Returns `true` if any node other than `exclude` holds a gate from
    /// the given exclusivity group.
    pub fn group_in_use(
        &self,
        library: &GateLibrary,
        group: &str,
        exclude: Option<NodeId>,
    ) -> bool {
        self.nodes.iter().any(|tn| {
            if Some(tn.node) == exclude {
                return false;
            }
            tn.gate
                .map(|g| library.gate(g).group == group)
                .unwrap_or(false)
        })
    }

    /// Returns `true` if every node carries a gate.
    pub fn is_fully_assigned(&self) -> bool {
        self.nodes.iter().all(|tn| tn.gate.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_library::{Curve, Gate};
    use helix_netlist::NodeKind;

    fn hill() -> Curve {
        Curve::Hill {
            ymax: 3.0,
            ymin: 0.01,
            k: 0.1,
            n: 2.0,
        }
    }

    fn setup() -> (Netlist, GateLibrary) {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("inv", NodeKind::Not).unwrap();
        nl.add_node("out", NodeKind::Output).unwrap();
        nl.add_edge("e0", "a", "inv").unwrap();
        nl.add_edge("e1", "inv", "out").unwrap();

        let mut lib = GateLibrary::new();
        lib.add_gate(Gate::logic("g0", "AmtR", hill())).unwrap();
        lib.add_gate(Gate::logic("g1", "AmtR", hill())).unwrap();
        lib.add_gate(Gate::logic("g2", "PhlF", hill())).unwrap();
        (nl, lib)
    }

    #[test]
    fn roles_mirror_node_kinds() {
        let (nl, _) = setup();
        let tm = TechMap::new(&nl);
        assert_eq!(tm.node(nl.node_id("a").unwrap()).role, NodeRole::Source);
        assert_eq!(tm.node(nl.node_id("inv").unwrap()).role, NodeRole::None);
        assert_eq!(tm.node(nl.node_id("out").unwrap()).role, NodeRole::Sink);
    }

    #[test]
    fn assignment_round_trip() {
        let (nl, lib) = setup();
        let mut tm = TechMap::new(&nl);
        let inv = nl.node_id("inv").unwrap();
        let g0 = lib.gate_id("g0").unwrap();
        tm.node_mut(inv).gate = Some(g0);
        assert_eq!(tm.gate_of(inv), Some(g0));
        assert_eq!(tm.user_of(g0), Some(inv));
    }

    #[test]
    fn usage_queries_track_the_table() {
        let (nl, lib) = setup();
        let mut tm = TechMap::new(&nl);
        let inv = nl.node_id("inv").unwrap();
        let g0 = lib.gate_id("g0").unwrap();
        let g1 = lib.gate_id("g1").unwrap();

        assert!(!tm.gate_in_use(g0));
        tm.node_mut(inv).gate = Some(g0);
        assert!(tm.gate_in_use(g0));
        assert!(!tm.gate_in_use(g1));
        // g1 shares g0's group, so the group is in use
        assert!(tm.group_in_use(&lib, "AmtR", None));
        assert!(!tm.group_in_use(&lib, "PhlF", None));
        // but not once the holding node is excluded
        assert!(!tm.group_in_use(&lib, "AmtR", Some(inv)));
    }

    #[test]
    fn clone_is_independent() {
        let (nl, lib) = setup();
        let mut tm = TechMap::new(&nl);
        let inv = nl.node_id("inv").unwrap();
        tm.node_mut(inv).gate = Some(lib.gate_id("g0").unwrap());

        let mut copy = tm.clone();
        copy.node_mut(inv).gate = Some(lib.gate_id("g2").unwrap());
        assert_ne!(tm.gate_of(inv), copy.gate_of(inv));
    }
}

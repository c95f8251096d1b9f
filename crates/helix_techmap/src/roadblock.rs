//! Roadblock detection for tandem promoter arrangements.
//!
//! Some promoters stall RNA polymerase when placed downstream of another
//! promoter in a tandem arrangement. A node whose fan-in stacks two or more
//! such promoters, at least one of them from a logic gate, is "roadblocked"
//! and likely to misbehave in vivo. The annealer steers away from
//! assignments that increase the roadblocked-node count.

use crate::techmap::TechMap;
use helix_library::{GateLibrary, GateRole};
use helix_netlist::{Netlist, NodeId};

/// Returns `true` if the node's fan-in promoter stack is roadblocked under
/// the current assignment.
///
/// A fan-in gate contributes its promoter part's name (logic gates) or its
/// own name (sensors) to the stack; the node is roadblocked when more than
/// one stacked name is roadblock-listed and at least one of those is a
/// logic promoter.
pub fn is_roadblocked(
    techmap: &TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
    node: NodeId,
) -> bool {
    let mut listed = 0;
    let mut logic_listed = 0;
    for source in netlist.fanin_sources(node) {
        let gate = match techmap.gate_of(source) {
            Some(g) => g,
            None => continue,
        };
        let gate = library.gate(gate);
        match gate.role {
            GateRole::InputSensor => {
                if library.is_input_roadblock(&gate.name) {
                    listed += 1;
                }
            }
            GateRole::Logic => {
                if let Some(promoter) = &gate.promoter {
                    if library.is_logic_roadblock(&promoter.name) {
                        listed += 1;
                        logic_listed += 1;
                    }
                }
            }
            GateRole::OutputReporter => {}
        }
    }
    listed > 1 && logic_listed > 0
}

/// Counts the roadblocked nodes in the circuit under the current assignment.
pub fn count_roadblocks(techmap: &TechMap, netlist: &Netlist, library: &GateLibrary) -> usize {
    netlist
        .nodes
        .iter()
        .filter(|n| !n.kind.is_input())
        .filter(|n| is_roadblocked(techmap, netlist, library, n.id))
        .count()
}

//! Writing the winning assignment back onto the netlist.

use crate::techmap::TechMap;
use helix_library::GateLibrary;
use helix_netlist::{AssignedPart, Netlist};

/// Annotates every node of the netlist with its assigned gate name and its
/// ordered part list.
///
/// A node's assembly is its own gate's parts followed by one promoter part
/// per in-edge, in fan-in order, drawn from each upstream node's gate.
/// Positions are renumbered consecutively from zero. Nodes without an
/// assignment (none, for a completed search) are left untouched.
pub fn write_back(techmap: &TechMap, netlist: &mut Netlist, library: &GateLibrary) {
    for index in 0..netlist.node_count() {
        let id = netlist.nodes[index].id;
        let gate = match techmap.gate_of(id) {
            Some(g) => library.gate(g),
            None => continue,
        };

        let mut parts: Vec<AssignedPart> = gate
            .parts
            .iter()
            .map(|p| AssignedPart {
                name: p.name.clone(),
                kind: p.kind.to_string(),
                position: 0,
            })
            .collect();
        for source in netlist.fanin_sources(id) {
            let upstream = match techmap.gate_of(source) {
                Some(g) => library.gate(g),
                None => continue,
            };
            if let Some(promoter) = &upstream.promoter {
                parts.push(AssignedPart {
                    name: promoter.name.clone(),
                    kind: promoter.kind.to_string(),
                    position: 0,
                });
            }
        }
        for (position, part) in parts.iter_mut().enumerate() {
            part.position = position as u32;
        }

        let node = netlist.node_mut(id);
        node.gate = Some(gate.name.clone());
        node.parts = parts;
    }
}

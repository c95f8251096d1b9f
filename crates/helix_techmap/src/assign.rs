//! Gate-to-node assignment under the exclusivity constraints.
//!
//! Two constraints hold at all times: a physical gate is assigned to at most
//! one node, and at most one gate from an exclusivity group appears in the
//! circuit. Both are enforced here by querying the assignment table; the
//! simulators assume them.

use crate::error::TechMapError;
use crate::techmap::TechMap;
use helix_library::{GateId, GateLibrary};
use helix_netlist::{Netlist, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Assigns input sensors to primary inputs, zipping both lists in
/// declaration order. Fails if the library has fewer sensors than the
/// netlist has inputs.
pub fn assign_input_sensors(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
) -> Result<(), TechMapError> {
    let inputs = netlist.input_nodes();
    let sensors = library.input_sensors();
    if sensors.len() < inputs.len() {
        return Err(TechMapError::InsufficientSensors {
            inputs: inputs.len(),
            sensors: sensors.len(),
        });
    }
    for (&node, &sensor) in inputs.iter().zip(sensors.iter()) {
        techmap.node_mut(node).gate = Some(sensor);
    }
    Ok(())
}

/// Assigns output reporters to primary outputs, zipping in declaration
/// order. Fails if the library has fewer reporters than outputs.
pub fn assign_output_reporters(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
) -> Result<(), TechMapError> {
    let outputs = netlist.output_nodes();
    let reporters = library.output_reporters();
    if reporters.len() < outputs.len() {
        return Err(TechMapError::InsufficientReporters {
            outputs: outputs.len(),
            reporters: reporters.len(),
        });
    }
    for (&node, &reporter) in outputs.iter().zip(reporters.iter()) {
        techmap.node_mut(node).gate = Some(reporter);
    }
    Ok(())
}

/// Randomly assigns a logic gate to every logic node.
///
/// The library's logic sublist is shuffled once, then consumed left to right
/// as the logic nodes are visited in netlist order: a gate whose group is
/// already represented in the circuit is skipped and never revisited. Fails
/// if the shuffled list runs out before every node is covered.
pub fn random_assignment(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
    rng: &mut impl Rng,
) -> Result<(), TechMapError> {
    let logic_nodes = netlist.logic_nodes();
    let mut pool = library.logic_gates();
    pool.shuffle(rng);

    let mut next = 0;
    for &node in &logic_nodes {
        techmap.node_mut(node).gate = None;
        loop {
            if next >= pool.len() {
                return Err(TechMapError::InsufficientGates {
                    needed: logic_nodes.len(),
                    available: pool.len(),
                });
            }
            let candidate = pool[next];
            next += 1;
            let group = &library.gate(candidate).group;
            if !techmap.group_in_use(library, group, None) {
                techmap.node_mut(node).gate = Some(candidate);
                break;
            }
        }
    }
    Ok(())
}

/// Applies one neighborhood move: substitute the gate on a random logic
/// node, or swap gates between two nodes.
///
/// The candidate gate either shares the incumbent's group (and is unused),
/// is unused with its group absent elsewhere, or is held by another node
/// (a swap). Every choice keeps the assignment feasible. Returns `false`
/// when no feasible candidate exists, leaving the map unchanged.
pub fn propose_move(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
    rng: &mut impl Rng,
) -> bool {
    let logic_nodes = netlist.logic_nodes();
    if logic_nodes.is_empty() {
        return false;
    }
    let node = logic_nodes[rng.gen_range(0..logic_nodes.len())];
    let incumbent = match techmap.gate_of(node) {
        Some(g) => g,
        None => return false,
    };
    let incumbent_group = &library.gate(incumbent).group;

    let candidates: Vec<GateId> = library
        .logic_gates()
        .into_iter()
        .filter(|&g| g != incumbent && is_feasible_candidate(techmap, library, node, incumbent_group, g))
        .collect();
    if candidates.is_empty() {
        return false;
    }
    let candidate = candidates[rng.gen_range(0..candidates.len())];

    match techmap.user_of(candidate) {
        Some(other) => {
            techmap.node_mut(other).gate = Some(incumbent);
            techmap.node_mut(node).gate = Some(candidate);
        }
        None => {
            techmap.node_mut(node).gate = Some(candidate);
        }
    }
    true
}

fn is_feasible_candidate(
    techmap: &TechMap,
    library: &GateLibrary,
    node: NodeId,
    incumbent_group: &str,
    candidate: GateId,
) -> bool {
    if techmap.gate_in_use(candidate) {
        // a swap with the holding node is always group-safe
        return true;
    }
    let group = &library.gate(candidate).group;
    group == incumbent_group || !techmap.group_in_use(library, group, Some(node))
}

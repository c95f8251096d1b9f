//! Promoter activity simulation.

use crate::error::TechMapError;
use crate::techmap::TechMap;
use helix_library::GateLibrary;
use helix_netlist::{upstream_order, Netlist, NodeId};

/// Seeds every primary input's activity vector from its sensor's reference
/// (low, high) RPU pair: high where the input's logic is true, low where it
/// is false.
///
/// Requires logic simulation and sensor assignment to have run. Depends only
/// on the fixed sensor assignment, so one run per search suffices.
pub fn init_input_activities(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
) -> Result<(), TechMapError> {
    for id in netlist.input_nodes() {
        let node_name = &netlist.node(id).name;
        let gate = techmap
            .gate_of(id)
            .ok_or_else(|| TechMapError::UnassignedNode(node_name.clone()))?;
        let sensor = &library.gate(gate).name;
        let (low, high) = library
            .input_reference(sensor)
            .map_err(|_| TechMapError::MissingInputReference(sensor.clone()))?;
        let tn = techmap.node_mut(id);
        tn.activity = tn
            .logic
            .iter()
            .map(|&on| if on { high } else { low })
            .collect();
    }
    Ok(())
}

/// Propagates activities through the circuit under the current assignment.
///
/// Each non-input node sums its fan-in activities per row and applies its
/// assigned gate's response curve to the sum. Must be re-run after every
/// assignment change.
pub fn simulate_activity(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
) -> Result<(), TechMapError> {
    for id in upstream_order(netlist)? {
        if netlist.node(id).kind.is_input() {
            continue;
        }
        let summed = sum_fanin_activities(techmap, netlist, id)?;
        let gate = techmap
            .gate_of(id)
            .ok_or_else(|| TechMapError::UnassignedNode(netlist.node(id).name.clone()))?;
        let curve = &library.gate(gate).response;
        techmap.node_mut(id).activity = summed.iter().map(|&x| curve.apply(x)).collect();
    }
    Ok(())
}

/// Sums the fan-in activity vectors of a node elementwise.
///
/// Mismatched fan-in lengths are a hard error: they signal corrupted
/// simulation state, not a recoverable condition.
pub fn sum_fanin_activities(
    techmap: &TechMap,
    netlist: &Netlist,
    id: NodeId,
) -> Result<Vec<f64>, TechMapError> {
    let sources = netlist.fanin_sources(id);
    let fanins: Vec<&[f64]> = sources
        .iter()
        .map(|&s| techmap.node(s).activity.as_slice())
        .collect();
    let rows = fanins.first().map_or(0, |f| f.len());
    for fanin in &fanins {
        if fanin.len() != rows {
            return Err(TechMapError::RaggedVectors {
                node: netlist.node(id).name.clone(),
                expected: rows,
                actual: fanin.len(),
            });
        }
    }
    let mut summed = vec![0.0; rows];
    for fanin in &fanins {
        for (total, &value) in summed.iter_mut().zip(fanin.iter()) {
            *total += value;
        }
    }
    Ok(summed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::simulate_logic;
    use helix_library::{Curve, Gate};
    use helix_netlist::NodeKind;

    fn setup() -> (Netlist, GateLibrary, TechMap) {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("inv", NodeKind::Not).unwrap();
        nl.add_node("out", NodeKind::Output).unwrap();
        nl.add_edge("e0", "a", "inv").unwrap();
        nl.add_edge("e1", "inv", "out").unwrap();

        let mut lib = GateLibrary::new();
        lib.add_input_sensor("sen", 0.1, 2.0).unwrap();
        lib.add_gate(Gate::logic(
            "rep",
            "PhlF",
            Curve::Hill {
                ymax: 4.0,
                ymin: 0.02,
                k: 0.5,
                n: 2.0,
            },
        ))
        .unwrap();
        lib.add_gate(Gate::output_reporter("yfp", 1.0)).unwrap();

        let mut tm = TechMap::new(&nl);
        simulate_logic(&mut tm, &nl).unwrap();
        tm.node_mut(nl.node_id("a").unwrap()).gate = Some(lib.gate_id("sen").unwrap());
        tm.node_mut(nl.node_id("inv").unwrap()).gate = Some(lib.gate_id("rep").unwrap());
        tm.node_mut(nl.node_id("out").unwrap()).gate = Some(lib.gate_id("yfp").unwrap());
        (nl, lib, tm)
    }

    #[test]
    fn inputs_follow_logic() {
        let (nl, lib, mut tm) = setup();
        init_input_activities(&mut tm, &nl, &lib).unwrap();
        let a = tm.node(nl.node_id("a").unwrap());
        assert_eq!(a.activity, vec![0.1, 2.0]);
    }

    #[test]
    fn activities_propagate_through_curves() {
        let (nl, lib, mut tm) = setup();
        init_input_activities(&mut tm, &nl, &lib).unwrap();
        simulate_activity(&mut tm, &nl, &lib).unwrap();

        let hill = |x: f64| 0.02 + (4.0 - 0.02) / (1.0 + (x / 0.5f64).powf(2.0));
        let inv = tm.node(nl.node_id("inv").unwrap());
        assert!((inv.activity[0] - hill(0.1)).abs() < 1e-12);
        assert!((inv.activity[1] - hill(2.0)).abs() < 1e-12);
        // the reporter is a unit-slope linear curve
        let out = tm.node(nl.node_id("out").unwrap());
        assert_eq!(out.activity, inv.activity);
    }

    #[test]
    fn vector_lengths_match_truth_table() {
        let (nl, lib, mut tm) = setup();
        init_input_activities(&mut tm, &nl, &lib).unwrap();
        simulate_activity(&mut tm, &nl, &lib).unwrap();
        for tn in tm.iter() {
            assert_eq!(tn.activity.len(), 2);
        }
    }

    #[test]
    fn missing_reference_is_an_error() {
        let (nl, lib, mut tm) = setup();
        // swap the sensor for a gate with no reference pair
        tm.node_mut(nl.node_id("a").unwrap()).gate = Some(lib.gate_id("rep").unwrap());
        let err = init_input_activities(&mut tm, &nl, &lib).unwrap_err();
        assert!(matches!(err, TechMapError::MissingInputReference(name) if name == "rep"));
    }

    #[test]
    fn unassigned_node_is_an_error() {
        let (nl, lib, mut tm) = setup();
        init_input_activities(&mut tm, &nl, &lib).unwrap();
        tm.node_mut(nl.node_id("inv").unwrap()).gate = None;
        let err = simulate_activity(&mut tm, &nl, &lib).unwrap_err();
        assert!(matches!(err, TechMapError::UnassignedNode(name) if name == "inv"));
    }

    #[test]
    fn ragged_fanins_are_rejected() {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("b", NodeKind::Input).unwrap();
        nl.add_node("g", NodeKind::Nor).unwrap();
        nl.add_edge("e0", "a", "g").unwrap();
        nl.add_edge("e1", "b", "g").unwrap();
        let mut tm = TechMap::new(&nl);
        tm.node_mut(nl.node_id("a").unwrap()).activity = vec![1.0, 2.0];
        tm.node_mut(nl.node_id("b").unwrap()).activity = vec![0.5];
        let err = sum_fanin_activities(&tm, &nl, nl.node_id("g").unwrap()).unwrap_err();
        assert!(matches!(
            err,
            TechMapError::RaggedVectors {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn fanin_summation() {
        let mut nl = Netlist::new();
        nl.add_node("a", NodeKind::Input).unwrap();
        nl.add_node("b", NodeKind::Input).unwrap();
        nl.add_node("g", NodeKind::Nor).unwrap();
        nl.add_edge("e0", "a", "g").unwrap();
        nl.add_edge("e1", "b", "g").unwrap();
        let mut tm = TechMap::new(&nl);
        tm.node_mut(nl.node_id("a").unwrap()).activity = vec![1.0, 2.0];
        tm.node_mut(nl.node_id("b").unwrap()).activity = vec![0.5, 0.25];
        let summed = sum_fanin_activities(&tm, &nl, nl.node_id("g").unwrap()).unwrap();
        assert_eq!(summed, vec![1.5, 2.25]);
    }
}

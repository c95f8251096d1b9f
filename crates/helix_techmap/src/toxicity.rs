//! Circuit toxicity simulation.
//!
//! Each logic gate's expression level imposes a growth penalty on the host,
//! measured as a table of (input activity, relative growth) points. Per-row
//! growth for a gate is interpolated from its table in log10-activity space;
//! the circuit-wide growth per row is the product over all logic nodes,
//! inherited by every output.

use crate::activity::sum_fanin_activities;
use crate::error::TechMapError;
use crate::techmap::TechMap;
use helix_library::{GateLibrary, ToxicityTable};
use helix_netlist::Netlist;

/// Lower clamp for any growth value: no gate kills the host outright.
pub const MIN_TOXICITY: f64 = 0.01;

/// Upper clamp for any growth value: growth is normalized to the uninduced
/// measurement, so values above 1.0 are measurement noise.
pub const MAX_TOXICITY: f64 = 1.00;

/// Seeds every output's toxicity vector to fully non-toxic (all 1.0), one
/// value per truth-table row. Requires logic simulation to have run.
pub fn init_output_toxicity(techmap: &mut TechMap, netlist: &Netlist) {
    for id in netlist.output_nodes() {
        let tn = techmap.node_mut(id);
        tn.toxicity = vec![MAX_TOXICITY; tn.logic.len()];
    }
}

/// Computes per-row toxicity for every logic node and the circuit-wide
/// product for every output. Requires activity simulation to have run.
pub fn simulate_toxicity(
    techmap: &mut TechMap,
    netlist: &Netlist,
    library: &GateLibrary,
) -> Result<(), TechMapError> {
    let logic_nodes = netlist.logic_nodes();
    for &id in &logic_nodes {
        let summed = sum_fanin_activities(techmap, netlist, id)?;
        let gate = techmap
            .gate_of(id)
            .ok_or_else(|| TechMapError::UnassignedNode(netlist.node(id).name.clone()))?;
        let toxicity = match &library.gate(gate).toxicity {
            Some(table) => summed.iter().map(|&a| growth_at(table, a)).collect(),
            None => vec![MAX_TOXICITY; summed.len()],
        };
        techmap.node_mut(id).toxicity = toxicity;
    }

    // Column-wise product over all logic nodes, clamped to the floor.
    let rows = logic_nodes
        .first()
        .map_or(0, |&id| techmap.node(id).toxicity.len());
    for &id in &logic_nodes {
        let len = techmap.node(id).toxicity.len();
        if len != rows {
            return Err(TechMapError::RaggedVectors {
                node: netlist.node(id).name.clone(),
                expected: rows,
                actual: len,
            });
        }
    }
    let mut product = vec![MAX_TOXICITY; rows];
    for &id in &logic_nodes {
        for (total, &value) in product.iter_mut().zip(techmap.node(id).toxicity.iter()) {
            *total = (*total * value).max(MIN_TOXICITY);
        }
    }
    for id in netlist.output_nodes() {
        techmap.node_mut(id).toxicity = product.clone();
    }
    Ok(())
}

/// Interpolates a gate's relative growth at the given input activity.
///
/// Below the table's smallest measured activity the smallest row's growth is
/// used; above the largest, the largest row's. In between, the tightest
/// bracketing rows are interpolated linearly in log10-activity space. The
/// result is clamped to `[MIN_TOXICITY, MAX_TOXICITY]`.
pub fn growth_at(table: &ToxicityTable, activity: f64) -> f64 {
    let (min_activity, min_growth) = table.row(table.arg_min_activity());
    let (max_activity, max_growth) = table.row(table.arg_max_activity());
    let raw = if activity <= min_activity {
        min_growth
    } else if activity >= max_activity {
        max_growth
    } else {
        // Both brackets exist: activity lies strictly inside the table range.
        let (lo_activity, lo_growth) = table.row(
            table
                .arg_infimum(activity)
                .unwrap_or(table.arg_min_activity()),
        );
        let (hi_activity, hi_growth) = table.row(
            table
                .arg_supremum(activity)
                .unwrap_or(table.arg_max_activity()),
        );
        if hi_activity == lo_activity {
            lo_growth
        } else {
            let weight =
                (activity.log10() - lo_activity.log10()) / (hi_activity.log10() - lo_activity.log10());
            lo_growth * (1.0 - weight) + hi_growth * weight
        }
    };
    raw.clamp(MIN_TOXICITY, MAX_TOXICITY)
}

/// Returns the lowest growth value across all outputs and rows, or 1.0 for
/// a circuit with no outputs. This is the health figure the annealer gates
/// acceptance on.
pub fn min_growth(techmap: &TechMap, netlist: &Netlist) -> f64 {
    let mut lowest = MAX_TOXICITY;
    for id in netlist.output_nodes() {
        for &value in &techmap.node(id).toxicity {
            if value < lowest {
                lowest = value;
            }
        }
    }
    lowest
}

//! On/off-ratio scoring of a simulated assignment.

use crate::techmap::TechMap;
use helix_netlist::{Netlist, NodeId};

/// Scores one output: the lowest activity among rows where the output's
/// required logic is true, divided by the highest activity among rows where
/// it is false. Larger means tighter separation between the on and off
/// states.
pub fn output_ratio(techmap: &TechMap, output: NodeId) -> f64 {
    let tn = techmap.node(output);
    let mut lowest_on = f64::MAX;
    // Seeded with the smallest positive double so an all-on output yields a
    // huge but finite ratio instead of a division by zero.
    let mut highest_off = f64::MIN_POSITIVE;
    for (&on, &activity) in tn.logic.iter().zip(tn.activity.iter()) {
        if on {
            if activity < lowest_on {
                lowest_on = activity;
            }
        } else if activity > highest_off {
            highest_off = activity;
        }
    }
    lowest_on / highest_off
}

/// Scores the whole circuit: the minimum output ratio over all outputs.
///
/// The weakest output bounds the circuit. Requires logic and activity
/// simulation to have run.
pub fn score(techmap: &TechMap, netlist: &Netlist) -> f64 {
    let mut worst: Option<f64> = None;
    for id in netlist.output_nodes() {
        let ratio = output_ratio(techmap, id);
        // first-found wins on ties
        if worst.map_or(true, |w| ratio < w) {
            worst = Some(ratio);
        }
    }
    worst.unwrap_or(0.0)
}

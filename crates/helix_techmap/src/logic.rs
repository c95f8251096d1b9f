//! Boolean logic simulation over the netlist.

use crate::error::TechMapError;
use crate::techmap::TechMap;
use helix_common::truth;
use helix_netlist::{upstream_order, Netlist, NodeId, NodeKind};

/// Annotates every node's logic vector in place.
///
/// Primary inputs receive the canonical truth-table columns (input 0 as the
/// most significant bit); every other node computes its kind's Boolean
/// function elementwise over its fan-in vectors, in upstream order. The
/// result depends only on the netlist topology, so one run per search
/// suffices: gate assignments never change it.
pub fn simulate_logic(techmap: &mut TechMap, netlist: &Netlist) -> Result<(), TechMapError> {
    let inputs = netlist.input_nodes();
    let num_inputs = inputs.len();
    for (index, &id) in inputs.iter().enumerate() {
        techmap.node_mut(id).logic = truth::input_column(index, num_inputs);
    }

    for id in upstream_order(netlist)? {
        if netlist.node(id).kind.is_input() {
            continue;
        }
        let column = evaluate_node(techmap, netlist, id)?;
        techmap.node_mut(id).logic = column;
    }
    Ok(())
}

fn evaluate_node(
    techmap: &TechMap,
    netlist: &Netlist,
    id: NodeId,
) -> Result<Vec<bool>, TechMapError> {
    let node = netlist.node(id);
    let sources = netlist.fanin_sources(id);
    let fanins: Vec<&[bool]> = sources
        .iter()
        .map(|&s| techmap.node(s).logic.as_slice())
        .collect();
    check_arity(netlist, id, &fanins)?;
    let rows = fanins[0].len();
    for fanin in &fanins[1..] {
        if fanin.len() != rows {
            return Err(TechMapError::RaggedVectors {
                node: node.name.clone(),
                expected: rows,
                actual: fanin.len(),
            });
        }
    }

    let mut column = Vec::with_capacity(rows);
    for row in 0..rows {
        let value = match node.kind {
            NodeKind::Not => !fanins[0][row],
            NodeKind::And => fanins[0][row] & fanins[1][row],
            NodeKind::Nand => !(fanins[0][row] & fanins[1][row]),
            NodeKind::Or => fanins[0][row] | fanins[1][row],
            NodeKind::Nor => !(fanins[0][row] | fanins[1][row]),
            NodeKind::Xor => fanins[0][row] ^ fanins[1][row],
            NodeKind::Xnor => !(fanins[0][row] ^ fanins[1][row]),
            // Multiple drivers of one output are ORed together.
            NodeKind::Output => fanins.iter().any(|f| f[row]),
            NodeKind::Input => unreachable!("inputs are seeded, not evaluated"),
        };
        column.push(value);
    }
    Ok(column)
}

fn check_arity(netlist: &Netlist, id: NodeId, fanins: &[&[bool]]) -> Result<(), TechMapError> {
    let node = netlist.node(id);
    let expected = match node.kind {
        NodeKind::Not => Some(1),
        NodeKind::And
        | NodeKind::Nand
        | NodeKind::Or
        | NodeKind::Nor
        | NodeKind::Xor
        | NodeKind::Xnor => Some(2),
        // Outputs accept any positive fan-in count.
        NodeKind::Output => None,
        NodeKind::Input => Some(0),
    };
    let ok = match expected {
        Some(n) => fanins.len() == n,
        None => !fanins.is_empty(),
    };
    if !ok {
        return Err(TechMapError::WrongFanIn {
            node: node.name.clone(),
            kind: node.kind.to_string(),
            expected: expected.unwrap_or(1),
            actual: fanins.len(),
        });
    }
    Ok(())
}

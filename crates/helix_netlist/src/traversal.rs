//! Upstream topological traversal.
//!
//! Produces the node order every simulator iterates in: a node is emitted
//! only after every node with an edge into it has been emitted, so primary
//! inputs come first and values can be propagated source-to-sink in a single
//! pass. Traversal state (the color map) is local to the call, never stored
//! on the nodes, so repeated or concurrent traversals of one netlist are
//! side-effect-free.

use crate::data::{Netlist, NetlistError};
use crate::ids::NodeId;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Returns all nodes in upstream topological order.
///
/// The traversal is a depth-first search over the reverse adjacency: each
/// node recurses into the sources of its in-edges before emitting itself.
/// All nodes are used as roots so disconnected inputs are included.
///
/// Fails with [`NetlistError::CycleDetected`] if the netlist is not
/// combinational. The source netlist is assumed acyclic; the check is a
/// structural invariant, not a supported feature.
pub fn upstream_order(netlist: &Netlist) -> Result<Vec<NodeId>, NetlistError> {
    let mut colors = vec![Color::White; netlist.node_count()];
    let mut order = Vec::with_capacity(netlist.node_count());
    for node in &netlist.nodes {
        visit(netlist, node.id, &mut colors, &mut order)?;
    }
    Ok(order)
}

fn visit(
    netlist: &Netlist,
    id: NodeId,
    colors: &mut [Color],
    order: &mut Vec<NodeId>,
) -> Result<(), NetlistError> {
    match colors[id.as_raw() as usize] {
        Color::Black => return Ok(()),
        Color::Gray => {
            return Err(NetlistError::CycleDetected(netlist.node(id).name.clone()));
        }
        Color::White => {}
    }
    colors[id.as_raw() as usize] = Color::Gray;
    for source in netlist.fanin_sources(id) {
        visit(netlist, source, colors, order)?;
    }
    colors[id.as_raw() as usize] = Color::Black;
    order.push(id);
    Ok(())
}

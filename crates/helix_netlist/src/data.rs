//! Core netlist data structures.
//!
//! Defines the logic netlist the mapper operates on: nodes (primary inputs,
//! primary outputs, and logic gates), directed edges, and the final gate
//! assignment written back onto each node. The [`Netlist`] is the central
//! read-only structure during the search; only the `gate` and `parts`
//! fields mutate, and only in the final write-back.

use crate::ids::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Errors arising from netlist construction or traversal.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// An edge referenced a node name that does not exist in the netlist.
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode {
        /// The edge being added.
        edge: String,
        /// The unknown node name.
        node: String,
    },

    /// A node was added with a name already present in the netlist.
    #[error("duplicate node name '{0}'")]
    DuplicateNode(String),

    /// A node type string did not name a supported kind.
    #[error("unknown node type '{0}'")]
    UnknownNodeKind(String),

    /// The netlist contains a cycle; the logic must be combinational.
    #[error("cycle detected at node '{0}'")]
    CycleDetected(String),
}

/// The type of a netlist node.
///
/// `Input` and `Output` are the circuit boundary (the original's `TopInput`
/// and `TopOutput` tags); everything else is a logic function realized by a
/// library gate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeKind {
    /// A primary input of the circuit.
    Input,
    /// A primary output of the circuit.
    Output,
    /// Logical negation, one fan-in.
    Not,
    /// Logical conjunction, two fan-ins.
    And,
    /// Negated conjunction, two fan-ins.
    Nand,
    /// Logical disjunction, two fan-ins.
    Or,
    /// Negated disjunction, two fan-ins.
    Nor,
    /// Exclusive disjunction, two fan-ins.
    Xor,
    /// Negated exclusive disjunction, two fan-ins.
    Xnor,
}

impl NodeKind {
    /// Returns `true` for primary input nodes.
    pub fn is_input(self) -> bool {
        self == NodeKind::Input
    }

    /// Returns `true` for primary output nodes.
    pub fn is_output(self) -> bool {
        self == NodeKind::Output
    }

    /// Returns `true` for interior logic nodes (neither input nor output).
    pub fn is_logic(self) -> bool {
        !self.is_input() && !self.is_output()
    }
}

impl FromStr for NodeKind {
    type Err = NetlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TopInput" => Ok(NodeKind::Input),
            "TopOutput" => Ok(NodeKind::Output),
            "NOT" => Ok(NodeKind::Not),
            "AND" => Ok(NodeKind::And),
            "NAND" => Ok(NodeKind::Nand),
            "OR" => Ok(NodeKind::Or),
            "NOR" => Ok(NodeKind::Nor),
            "XOR" => Ok(NodeKind::Xor),
            "XNOR" => Ok(NodeKind::Xnor),
            other => Err(NetlistError::UnknownNodeKind(other.to_string())),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Input => "TopInput",
            NodeKind::Output => "TopOutput",
            NodeKind::Not => "NOT",
            NodeKind::And => "AND",
            NodeKind::Nand => "NAND",
            NodeKind::Or => "OR",
            NodeKind::Nor => "NOR",
            NodeKind::Xor => "XOR",
            NodeKind::Xnor => "XNOR",
        };
        write!(f, "{s}")
    }
}

/// One DNA part of the final per-node assembly, written back after the search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignedPart {
    /// The part name (e.g., a promoter or CDS identifier).
    pub name: String,
    /// The part type (e.g., "promoter", "cds", "terminator").
    pub kind: String,
    /// The position of this part in the node's ordered assembly.
    pub position: u32,
}

/// A node in the netlist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// The unique ID of this node.
    pub id: NodeId,
    /// Human-readable node name, unique within the netlist.
    pub name: String,
    /// The node type; immutable after construction.
    pub kind: NodeKind,
    /// Inbound edges, in declaration order.
    pub inputs: Vec<EdgeId>,
    /// Outbound edges, in declaration order.
    pub outputs: Vec<EdgeId>,
    /// The assigned library gate name (`None` until write-back).
    pub gate: Option<String>,
    /// The ordered part list of the final assembly (empty until write-back).
    pub parts: Vec<AssignedPart>,
}

/// A directed edge connecting exactly one source node to one target node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    /// The unique ID of this edge.
    pub id: EdgeId,
    /// Human-readable edge name.
    pub name: String,
    /// The driving node.
    pub source: NodeId,
    /// The driven node.
    pub target: NodeId,
}

/// The logic netlist for technology mapping.
///
/// Nodes and edges live in arena vectors addressed by [`NodeId`]/[`EdgeId`];
/// an auxiliary name index supports lookups from external collaborators.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Netlist {
    /// All nodes in the netlist, in declaration order.
    pub nodes: Vec<Node>,
    /// All edges in the netlist, in declaration order.
    pub edges: Vec<Edge>,
    /// Auxiliary index: node name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub node_by_name: HashMap<String, NodeId>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_by_name: HashMap::new(),
        }
    }

    /// Adds a node and returns its ID.
    ///
    /// Fails if a node with the same name already exists.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId, NetlistError> {
        let name = name.into();
        if self.node_by_name.contains_key(&name) {
            return Err(NetlistError::DuplicateNode(name));
        }
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.node_by_name.insert(name.clone(), id);
        self.nodes.push(Node {
            id,
            name,
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            gate: None,
            parts: Vec::new(),
        });
        Ok(id)
    }

    /// Adds an edge between two named nodes and returns its ID.
    ///
    /// Fails if either endpoint name is unknown.
    pub fn add_edge(
        &mut self,
        name: impl Into<String>,
        source: &str,
        target: &str,
    ) -> Result<EdgeId, NetlistError> {
        let name = name.into();
        let source_id = self.node_id(source).ok_or_else(|| NetlistError::UnknownNode {
            edge: name.clone(),
            node: source.to_string(),
        })?;
        let target_id = self.node_id(target).ok_or_else(|| NetlistError::UnknownNode {
            edge: name.clone(),
            node: target.to_string(),
        })?;
        let id = EdgeId::from_raw(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            name,
            source: source_id,
            target: target_id,
        });
        self.nodes[source_id.as_raw() as usize].outputs.push(id);
        self.nodes[target_id.as_raw() as usize].inputs.push(id);
        Ok(id)
    }

    /// Returns the node with the given ID.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the node with the given ID.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.as_raw() as usize]
    }

    /// Returns the edge with the given ID.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.as_raw() as usize]
    }

    /// Looks up a node ID by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_by_name.get(name).copied()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the primary input node IDs, in declaration order.
    pub fn input_nodes(&self) -> Vec<NodeId> {
        self.nodes_of(|k| k.is_input())
    }

    /// Returns the primary output node IDs, in declaration order.
    pub fn output_nodes(&self) -> Vec<NodeId> {
        self.nodes_of(|k| k.is_output())
    }

    /// Returns the interior logic node IDs, in declaration order.
    pub fn logic_nodes(&self) -> Vec<NodeId> {
        self.nodes_of(|k| k.is_logic())
    }

    fn nodes_of(&self, pred: impl Fn(NodeKind) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| pred(n.kind))
            .map(|n| n.id)
            .collect()
    }

    /// Returns the source node IDs of a node's in-edges, in edge order.
    pub fn fanin_sources(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .inputs
            .iter()
            .map(|&e| self.edge(e).source)
            .collect()
    }

    /// Rebuilds the name index after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.node_by_name.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.node_by_name
                .insert(node.name.clone(), NodeId::from_raw(i as u32));
        }
    }

    /// Returns whether every node carries a gate assignment.
    pub fn is_fully_assigned(&self) -> bool {
        self.nodes.iter().all(|n| n.gate.is_some())
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

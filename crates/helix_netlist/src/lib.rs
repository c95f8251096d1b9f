//! Netlist graph model for the Helix genetic circuit mapper.
//!
//! A [`Netlist`] is a directed acyclic multigraph of named logic nodes and
//! edges, built once from an upstream logic-synthesis stage and annotated in
//! place with the winning gate assignment at the end of the search. The
//! [`traversal`] module provides the upstream topological order every
//! simulator iterates in.

#![warn(missing_docs)]

pub mod data;
pub mod ids;
pub mod traversal;

pub use data::{AssignedPart, Edge, Netlist, NetlistError, Node, NodeKind};
pub use ids::{EdgeId, NodeId};
pub use traversal::upstream_order;

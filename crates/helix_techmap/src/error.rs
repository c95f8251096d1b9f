//! Error taxonomy for the gate-assignment search.

use helix_config::ConfigError;
use helix_library::LibraryError;
use helix_netlist::NetlistError;
use thiserror::Error;

/// Errors raised during simulation or search.
///
/// All of these are non-recoverable within a run: configuration errors mean
/// the inputs cannot cover the netlist, structural errors mean the netlist or
/// library data is corrupt. Neither is retried with modified state.
#[derive(Debug, Error)]
pub enum TechMapError {
    /// The library ran out of usable logic gates before every logic node was
    /// covered.
    #[error(
        "not enough gates to cover the netlist: {needed} logic nodes, \
         {available} gates in the library"
    )]
    InsufficientGates {
        /// Logic nodes requiring a gate.
        needed: usize,
        /// Logic gates available in the library.
        available: usize,
    },

    /// The library has fewer input sensors than the netlist has inputs.
    #[error("not enough input sensors: {inputs} inputs, {sensors} sensors")]
    InsufficientSensors {
        /// Primary inputs in the netlist.
        inputs: usize,
        /// Input sensors in the library.
        sensors: usize,
    },

    /// The library has fewer output reporters than the netlist has outputs.
    #[error("not enough output reporters: {outputs} outputs, {reporters} reporters")]
    InsufficientReporters {
        /// Primary outputs in the netlist.
        outputs: usize,
        /// Output reporters in the library.
        reporters: usize,
    },

    /// An input node's sensor has no reference activity pair.
    #[error("no input activity reference for '{0}'")]
    MissingInputReference(String),

    /// A simulator touched a node with no gate assigned.
    #[error("node '{0}' has no assigned gate")]
    UnassignedNode(String),

    /// A node has the wrong number of fan-in edges for its kind.
    #[error("{kind} node '{node}' has {actual} fan-ins, expected {expected}")]
    WrongFanIn {
        /// The offending node name.
        node: String,
        /// The node kind as declared.
        kind: String,
        /// The fan-in arity the kind requires.
        expected: usize,
        /// The fan-in arity found.
        actual: usize,
    },

    /// Fan-in vectors of unequal length reached a simulator. Signals
    /// corrupted netlist or simulation state, not a runtime condition.
    #[error("ragged fan-in vectors at node '{node}': {expected} rows vs {actual}")]
    RaggedVectors {
        /// The node whose fan-ins disagree.
        node: String,
        /// Row count of the first fan-in vector.
        expected: usize,
        /// Row count of the mismatched vector.
        actual: usize,
    },

    /// An internal invariant violation, indicating a bug in the mapper.
    #[error(transparent)]
    Internal(#[from] helix_common::InternalError),

    /// A netlist construction or traversal error.
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    /// A gate library error.
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// An invalid search configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

//! The genetic gate library for the Helix mapper.
//!
//! A [`GateLibrary`] holds the immutable set of physical gates available for
//! assignment: logic repressors with Hill response functions and toxicity
//! tables, input sensors, and output reporters, plus the reference promoter
//! activities for the sensors. Gates are value objects addressed by
//! [`GateId`]; nothing in this crate mutates during the search.

#![warn(missing_docs)]

pub mod curve;
pub mod cytometry;
pub mod gate;
pub mod library;
pub mod part;
pub mod toxicity;

pub use curve::Curve;
pub use cytometry::{Cytometry, Histogram};
pub use gate::{Gate, GateRole};
pub use library::{GateId, GateLibrary, LibraryError};
pub use part::{Part, PartKind};
pub use toxicity::ToxicityTable;

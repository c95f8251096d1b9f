//! DNA parts making up a library gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The functional type of a DNA part.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PartKind {
    /// A promoter driven by the upstream gate's output.
    Promoter,
    /// A self-cleaving ribozyme insulator.
    Ribozyme,
    /// A ribosome binding site.
    Rbs,
    /// The repressor coding sequence.
    Cds,
    /// A transcription terminator.
    Terminator,
    /// An assembly scar.
    Scar,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartKind::Promoter => "promoter",
            PartKind::Ribozyme => "ribozyme",
            PartKind::Rbs => "rbs",
            PartKind::Cds => "cds",
            PartKind::Terminator => "terminator",
            PartKind::Scar => "scar",
        };
        write!(f, "{s}")
    }
}

/// A named DNA part of a specific kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// The part name.
    pub name: String,
    /// The part kind.
    pub kind: PartKind,
}

impl Part {
    /// Creates a new part.
    pub fn new(name: impl Into<String>, kind: PartKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

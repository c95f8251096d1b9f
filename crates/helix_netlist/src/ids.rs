//! Opaque ID newtypes for netlist entities.
//!
//! [`NodeId`] and [`EdgeId`] are thin `u32` wrappers used as arena indices
//! into the netlist. They are `Copy`, `Hash`, and `Serialize`/`Deserialize`.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a node in the netlist.
    NodeId
);

define_id!(
    /// Opaque, copyable ID for an edge in the netlist.
    EdgeId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn node_id_roundtrip() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }

    #[test]
    fn edge_id_roundtrip() {
        let id = EdgeId::from_raw(99);
        assert_eq!(id.as_raw(), 99);
    }

    #[test]
    fn id_equality() {
        let a = NodeId::from_raw(3);
        let b = NodeId::from_raw(3);
        let c = NodeId::from_raw(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(EdgeId::from_raw(1));
        set.insert(EdgeId::from_raw(2));
        set.insert(EdgeId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = NodeId::from_raw(55);
        let json = serde_json::to_string(&id).unwrap();
        let restored: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }

    #[test]
    fn id_display() {
        let id = EdgeId::from_raw(42);
        assert_eq!(format!("{id}"), "42");
    }
}

//! Shared foundational types for the Helix genetic circuit mapper.
//!
//! This crate provides the common result type used for internal invariant
//! violations and the canonical truth-table helpers shared by the logic,
//! activity, and toxicity simulators.

#![warn(missing_docs)]

pub mod result;
pub mod truth;

pub use result::{HelixResult, InternalError};
pub use truth::{input_column, num_rows};

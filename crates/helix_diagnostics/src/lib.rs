//! Structured diagnostics for the Helix mapping pipeline.
//!
//! The mapper reports user-facing problems and search progress through
//! [`Diagnostic`] values collected in a thread-safe [`DiagnosticSink`].
//! Diagnostics carry a severity, a structured code, and an optional netlist
//! node name for context (this domain has no source text to span).

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::render;
pub use severity::Severity;
pub use sink::DiagnosticSink;

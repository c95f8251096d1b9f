//! Plain-text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use std::fmt::Write;

/// Renders a diagnostic as a human-readable text block.
///
/// Format: `severity[CODE]: message`, followed by the node context and any
/// footnotes on indented lines.
pub fn render(diag: &Diagnostic) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);
    if let Some(node) = &diag.node {
        let _ = write!(out, "\n  --> node '{node}'");
    }
    for note in &diag.notes {
        let _ = write!(out, "\n  note: {note}");
    }
    out
}

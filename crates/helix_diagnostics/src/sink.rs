//! Thread-safe diagnostic accumulator for parallel search trajectories.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A thread-safe accumulator for diagnostics emitted during mapping.
///
/// Multiple trajectories can emit diagnostics concurrently via
/// [`emit`](Self::emit). The error count is tracked atomically for fast
/// `has_errors` checks without locking the diagnostic vector.
///
/// The search is verbose at [`Severity::Note`] (one progress note per
/// trajectory plus the per-node assignment report), so a sink can be
/// created with a minimum severity to keep only warnings and errors.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    min_severity: Severity,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink that keeps every severity.
    pub fn new() -> Self {
        Self::with_min_severity(Severity::Note)
    }

    /// Creates a sink that silently discards diagnostics below `min`.
    pub fn with_min_severity(min: Severity) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
            min_severity: min,
        }
    }

    /// Emits a diagnostic into the sink.
    ///
    /// Diagnostics below the sink's minimum severity are dropped. If the
    /// diagnostic has [`Severity::Error`], the error count is incremented
    /// atomically.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity < self.min_severity {
            return;
        }
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        let mut diagnostics = self.diagnostics.lock().unwrap();
        diagnostics.push(diag);
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated diagnostics and resets the error count,
    /// leaving the sink empty for the next mapping run.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.lock().unwrap();
        self.error_count.store(0, Ordering::Relaxed);
        std::mem::take(&mut *diagnostics)
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let diagnostics = self.diagnostics.lock().unwrap();
        diagnostics.clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

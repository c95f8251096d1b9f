//! Common result and error types for the Helix mapper.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug in Helix), not a
/// problem with the user's netlist or gate library. Input problems are
/// reported through the dedicated error enums of each crate.
pub type HelixResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Helix, not a user input problem.
///
/// These errors should never occur during normal operation. If one does
/// occur, it means there is a logic error in the mapper that should be fixed.
#[derive(Debug, thiserror::Error)]
#[error("internal mapper error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

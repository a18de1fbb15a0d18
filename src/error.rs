//! Error types for the emulated file and registry.

use std::fmt;

use thiserror::Error;

use crate::data::DataKind;

/// A test-configured failure value, raised in place of a normal result.
///
/// Cloneable so one configured failure can surface from any number of
/// calls; carries only a message, which is what test assertions match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedFailure {
    message: String,
}

impl InjectedFailure {
    /// Creates a failure carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The configured message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors raised by handle operations and the open registry.
///
/// End-of-buffer reads and repeated closes are not errors; they return
/// empty results or no-op, matching real file-handle behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Data of one kind was written into a buffer of the other kind.
    /// Nothing is written when this is raised.
    #[error("type mismatch: cannot write {data} data into a {buffer} buffer")]
    TypeMismatch {
        /// Kind of the data passed to `write`.
        data: DataKind,
        /// Kind of the buffer it was written into.
        buffer: DataKind,
    },

    /// A failure configured by the test fired instead of the normal result.
    #[error("injected failure: {0}")]
    Injected(InjectedFailure),

    /// The mode string passed to `open` could not be parsed.
    #[error("invalid mode string: {0:?}")]
    InvalidMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = Error::TypeMismatch { data: DataKind::Binary, buffer: DataKind::Text };
        assert_eq!(
            err.to_string(),
            "type mismatch: cannot write binary data into a text buffer"
        );
    }

    #[test]
    fn injected_failure_carries_message() {
        let err = Error::Injected(InjectedFailure::new("disk on fire"));
        assert_eq!(err.to_string(), "injected failure: disk on fire");
    }
}

//! Open-mode strings as accepted by the dispensing entry point.

use std::fmt;

use crate::data::DataKind;
use crate::error::Error;

/// The base operation encoded in a mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOp {
    /// `"r"` — open for reading.
    Read,
    /// `"w"` — open for writing.
    Write,
    /// `"a"` — open for appending.
    Append,
    /// `"x"` — open for exclusive creation.
    Create,
}

/// A parsed mode string such as `"r"`, `"wb"` or `"a+"`.
///
/// The emulation records the mode for introspection and uses its
/// binary-ness to pick the buffer kind; it does not enforce read-only or
/// write-only access, and opening for writing never truncates existing
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMode {
    op: ModeOp,
    binary: bool,
    update: bool,
    raw: String,
}

impl OpenMode {
    /// Parses a mode string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] when the string is not one base
    /// operation (`r`/`w`/`a`/`x`) optionally followed by `b` and/or `+`
    /// (or `t`, which is the text default).
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut chars = raw.chars();
        let op = match chars.next() {
            Some('r') => ModeOp::Read,
            Some('w') => ModeOp::Write,
            Some('a') => ModeOp::Append,
            Some('x') => ModeOp::Create,
            _ => return Err(Error::InvalidMode(raw.to_string())),
        };

        let mut binary = false;
        let mut update = false;
        for c in chars {
            match c {
                'b' if !binary => binary = true,
                't' if !binary => {}
                '+' if !update => update = true,
                _ => return Err(Error::InvalidMode(raw.to_string())),
            }
        }

        Ok(Self { op, binary, update, raw: raw.to_string() })
    }

    /// The base operation.
    #[must_use]
    pub fn op(&self) -> ModeOp {
        self.op
    }

    /// `true` for binary modes (`"rb"`, `"wb"`, ...).
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// `true` for update modes (`"r+"`, `"w+b"`, ...).
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.update
    }

    /// The buffer kind this mode implies.
    #[must_use]
    pub fn kind(&self) -> DataKind {
        if self.binary {
            DataKind::Binary
        } else {
            DataKind::Text
        }
    }

    /// The mode string as originally supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        Self { op: ModeOp::Read, binary: false, update: false, raw: "r".to_string() }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

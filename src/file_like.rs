//! The file-handle contract dispensed by the registry.
//!
//! The capability set is fixed and explicit: whatever a caller could do
//! with a real handle returned from the open primitive, it can do through
//! this trait, and every call is recorded for later assertion.

use crate::calls::CallLog;
use crate::data::FileData;
use crate::error::{Error, InjectedFailure};
use crate::mode::OpenMode;

/// A test-configured alternate outcome for read operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEffect {
    /// Every read fails with this failure; buffer and cursor untouched.
    Fail(InjectedFailure),
    /// Every read returns this value; buffer and cursor untouched.
    Yield(FileData),
}

/// A test-configured alternate outcome for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteEffect {
    /// Every write fails with this failure; nothing is written.
    Fail(InjectedFailure),
    /// Writes are recorded in the call log but never reach the buffer.
    Discard,
}

/// The emulated file-handle contract.
///
/// [`EmulatedFile`](crate::handle::EmulatedFile) is the standard
/// implementation; a custom implementation can be injected into the
/// registry for one path to model arbitrary behavior.
pub trait FileLike: std::fmt::Debug {
    /// Reads up to `limit` characters/bytes from the cursor, advancing it.
    ///
    /// With `limit` of `None`, reads everything from the cursor to the end.
    /// Returns an empty payload when the cursor is at or past the end.
    ///
    /// # Errors
    ///
    /// Fails only when a read effect is configured to fail.
    fn read(&mut self, limit: Option<usize>) -> Result<FileData, Error>;

    /// Reads the next line, including its terminator when present.
    ///
    /// Returns an empty payload at end-of-buffer.
    ///
    /// # Errors
    ///
    /// Fails only when a read effect is configured to fail.
    fn read_line(&mut self) -> Result<FileData, Error>;

    /// Reads all remaining lines, advancing the cursor to the end.
    ///
    /// # Errors
    ///
    /// Fails only when a read effect is configured to fail.
    fn read_lines(&mut self) -> Result<Vec<FileData>, Error>;

    /// Writes `data` at the cursor, overwriting and extending as needed,
    /// and advances the cursor by `data.len()`.
    ///
    /// Returns the number of characters/bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when `data`'s kind differs from the
    /// buffer's kind (nothing is written), or the configured write-effect
    /// failure.
    fn write(&mut self, data: FileData) -> Result<usize, Error>;

    /// Writes each element in order via [`write`](Self::write).
    ///
    /// # Errors
    ///
    /// Propagates the first `write` error; earlier elements stay written.
    fn write_lines(&mut self, lines: Vec<FileData>) -> Result<(), Error>;

    /// Current cursor offset.
    fn tell(&self) -> usize;

    /// Moves the cursor to an absolute offset. Offsets past the end are
    /// allowed; reads there return empty and writes extend the buffer.
    fn seek(&mut self, offset: usize);

    /// Marks the handle closed. Idempotent.
    fn close(&mut self);

    /// `true` once [`close`](Self::close) has been called.
    fn is_closed(&self) -> bool;

    /// The path this handle was opened under, once resolved.
    fn name(&self) -> Option<&str>;

    /// The mode from the most recent open.
    fn mode(&self) -> &OpenMode;

    /// Applied by the registry on every open: records `path` and `mode`,
    /// converting the buffer when the mode's kind differs from the
    /// buffer's current kind. A kind change resets the cursor to 0.
    fn assign_identity(&mut self, path: &str, mode: OpenMode);

    /// The whole buffer, regardless of cursor position.
    fn contents(&self) -> FileData;

    /// Replaces the whole buffer without moving the cursor. Used to
    /// pre-seed contents before the code under test runs.
    fn set_contents(&mut self, data: FileData);

    /// Scoped-resource acquisition: resets the cursor to 0 so a freshly
    /// "opened" handle reads from the top regardless of prior state.
    fn acquire(&mut self);

    /// Scoped-resource release: closes the handle.
    fn release(&mut self);

    /// Configures (or clears) the injected outcome for reads.
    fn set_read_effect(&mut self, effect: Option<ReadEffect>);

    /// Configures (or clears) the injected outcome for writes.
    fn set_write_effect(&mut self, effect: Option<WriteEffect>);

    /// The calls recorded on this handle.
    fn log(&self) -> &CallLog;

    /// Restores the handle to its initial state: empty contents, cursor
    /// at 0, not closed, effects and call log cleared.
    fn reset(&mut self);
}

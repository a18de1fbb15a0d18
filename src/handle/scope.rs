//! Scoped access to a handle: enter/exit semantics and line iteration.

use std::rc::Rc;

use crate::data::FileData;
use crate::error::Error;
use crate::mode::OpenMode;

use super::FileHandle;

/// A guard giving a handle scoped-resource semantics.
///
/// Construction acquires the handle (rewinding its cursor to 0, so a
/// freshly "opened" scope always reads from the top); dropping the guard
/// releases it, which closes the handle unconditionally. The capability
/// set is forwarded so tests don't need to borrow through the `RefCell`
/// themselves.
pub struct ScopedFile {
    handle: FileHandle,
}

impl ScopedFile {
    /// Acquires the handle, rewinding its cursor to 0.
    #[must_use]
    pub fn new(handle: FileHandle) -> Self {
        handle.borrow_mut().acquire();
        Self { handle }
    }

    /// A shared clone of the underlying handle, for assertions that
    /// outlive the scope.
    #[must_use]
    pub fn handle(&self) -> FileHandle {
        Rc::clone(&self.handle)
    }

    /// Forwards to [`FileLike::read`](crate::FileLike::read).
    ///
    /// # Errors
    ///
    /// Propagates the handle's error.
    pub fn read(&self, limit: Option<usize>) -> Result<FileData, Error> {
        self.handle.borrow_mut().read(limit)
    }

    /// Forwards to [`FileLike::read_line`](crate::FileLike::read_line).
    ///
    /// # Errors
    ///
    /// Propagates the handle's error.
    pub fn read_line(&self) -> Result<FileData, Error> {
        self.handle.borrow_mut().read_line()
    }

    /// Forwards to [`FileLike::read_lines`](crate::FileLike::read_lines).
    ///
    /// # Errors
    ///
    /// Propagates the handle's error.
    pub fn read_lines(&self) -> Result<Vec<FileData>, Error> {
        self.handle.borrow_mut().read_lines()
    }

    /// Forwards to [`FileLike::write`](crate::FileLike::write).
    ///
    /// # Errors
    ///
    /// Propagates the handle's error.
    pub fn write(&self, data: impl Into<FileData>) -> Result<usize, Error> {
        self.handle.borrow_mut().write(data.into())
    }

    /// Forwards to [`FileLike::write_lines`](crate::FileLike::write_lines).
    ///
    /// # Errors
    ///
    /// Propagates the handle's error.
    pub fn write_lines(&self, lines: Vec<FileData>) -> Result<(), Error> {
        self.handle.borrow_mut().write_lines(lines)
    }

    /// Current cursor offset.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.handle.borrow().tell()
    }

    /// Moves the cursor to an absolute offset.
    pub fn seek(&self, offset: usize) {
        self.handle.borrow_mut().seek(offset);
    }

    /// The path the handle was opened under.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.handle.borrow().name().map(ToString::to_string)
    }

    /// The mode from the most recent open.
    #[must_use]
    pub fn mode(&self) -> OpenMode {
        self.handle.borrow().mode().clone()
    }

    /// `true` once the handle has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.borrow().is_closed()
    }

    /// The whole buffer, regardless of cursor position.
    #[must_use]
    pub fn contents(&self) -> FileData {
        self.handle.borrow().contents()
    }

    /// Iterates over the remaining lines.
    #[must_use]
    pub fn lines(&self) -> LineIter {
        LineIter::new(self.handle())
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        self.handle.borrow_mut().release();
    }
}

/// Iterator over a handle's lines, driven by repeated line reads.
///
/// Yields `None` once the buffer is exhausted; restart by seeking the
/// handle back and creating a new iterator.
pub struct LineIter {
    handle: FileHandle,
}

impl LineIter {
    /// Creates an iterator reading lines from the handle's cursor onward.
    #[must_use]
    pub fn new(handle: FileHandle) -> Self {
        Self { handle }
    }
}

impl Iterator for LineIter {
    type Item = Result<FileData, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.handle.borrow_mut().read_line() {
            Ok(line) if line.is_empty() => None,
            Ok(line) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    }
}

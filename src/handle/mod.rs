//! The emulated file handle: an in-memory buffer with file-like behavior.

mod buffer;
pub mod scope;

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use serde_json::json;

use crate::calls::CallLog;
use crate::data::FileData;
use crate::error::Error;
use crate::file_like::{FileLike, ReadEffect, WriteEffect};
use crate::mode::OpenMode;

use buffer::Buffer;

pub use scope::{LineIter, ScopedFile};

/// A shared handle to a file-like object.
///
/// Handles are reference-counted so repeated opens of the same path
/// observe the same state; the intended caller is a single test thread.
pub type FileHandle = Rc<RefCell<dyn FileLike>>;

/// The standard in-memory implementation of [`FileLike`].
///
/// Holds a buffer and cursor, the identity from the most recent open
/// (name and mode), a closed flag, optional injected read/write effects,
/// and a log of every call made on it.
#[derive(Debug)]
pub struct EmulatedFile {
    buffer: Buffer,
    name: Option<String>,
    mode: OpenMode,
    closed: bool,
    read_effect: Option<ReadEffect>,
    write_effect: Option<WriteEffect>,
    log: CallLog,
}

impl EmulatedFile {
    /// Creates an empty text-mode file.
    #[must_use]
    pub fn new() -> Self {
        Self::with_contents(FileData::Text(String::new()))
    }

    /// Creates a file pre-seeded with the given contents.
    pub fn with_contents(data: impl Into<FileData>) -> Self {
        Self {
            buffer: Buffer::new(data.into()),
            name: None,
            mode: OpenMode::default(),
            closed: false,
            read_effect: None,
            write_effect: None,
            log: CallLog::new(),
        }
    }

    /// Wraps the file in a shared [`FileHandle`].
    #[must_use]
    pub fn into_handle(self) -> FileHandle {
        Rc::new(RefCell::new(self))
    }
}

impl Default for EmulatedFile {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLike for EmulatedFile {
    fn read(&mut self, limit: Option<usize>) -> Result<FileData, Error> {
        self.log.record("read", json!({ "limit": limit }));
        match &self.read_effect {
            Some(ReadEffect::Fail(failure)) => Err(Error::Injected(failure.clone())),
            Some(ReadEffect::Yield(data)) => Ok(data.clone()),
            None => {
                let data = self.buffer.read(limit);
                trace!("read {} units from {:?}", data.len(), self.name);
                Ok(data)
            }
        }
    }

    fn read_line(&mut self) -> Result<FileData, Error> {
        self.log.record("read_line", json!({}));
        match &self.read_effect {
            Some(ReadEffect::Fail(failure)) => Err(Error::Injected(failure.clone())),
            Some(ReadEffect::Yield(data)) => Ok(data.clone()),
            None => Ok(self.buffer.read_line()),
        }
    }

    fn read_lines(&mut self) -> Result<Vec<FileData>, Error> {
        self.log.record("read_lines", json!({}));
        match &self.read_effect {
            Some(ReadEffect::Fail(failure)) => Err(Error::Injected(failure.clone())),
            Some(ReadEffect::Yield(data)) => Ok(vec![data.clone()]),
            None => Ok(self.buffer.read_lines()),
        }
    }

    fn write(&mut self, data: FileData) -> Result<usize, Error> {
        self.log.record("write", json!({ "data": data.to_json() }));
        match &self.write_effect {
            Some(WriteEffect::Fail(failure)) => Err(Error::Injected(failure.clone())),
            Some(WriteEffect::Discard) => Ok(data.len()),
            None => {
                let written = self.buffer.write(&data)?;
                trace!("wrote {written} units to {:?}", self.name);
                Ok(written)
            }
        }
    }

    fn write_lines(&mut self, lines: Vec<FileData>) -> Result<(), Error> {
        for line in lines {
            self.write(line)?;
        }
        Ok(())
    }

    fn tell(&self) -> usize {
        self.buffer.cursor()
    }

    fn seek(&mut self, offset: usize) {
        self.log.record("seek", json!({ "offset": offset }));
        self.buffer.seek(offset);
    }

    fn close(&mut self) {
        self.log.record("close", json!({}));
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn mode(&self) -> &OpenMode {
        &self.mode
    }

    fn assign_identity(&mut self, path: &str, mode: OpenMode) {
        self.buffer.convert(mode.kind());
        self.name = Some(path.to_string());
        self.mode = mode;
    }

    fn contents(&self) -> FileData {
        self.buffer.snapshot()
    }

    fn set_contents(&mut self, data: FileData) {
        self.buffer.replace(data);
    }

    fn acquire(&mut self) {
        // Re-opened handles read from the top; not logged as a seek call.
        self.buffer.seek(0);
    }

    fn release(&mut self) {
        self.close();
    }

    fn set_read_effect(&mut self, effect: Option<ReadEffect>) {
        self.read_effect = effect;
    }

    fn set_write_effect(&mut self, effect: Option<WriteEffect>) {
        self.write_effect = effect;
    }

    fn log(&self) -> &CallLog {
        &self.log
    }

    fn reset(&mut self) {
        self.buffer = Buffer::new(FileData::Text(String::new()));
        self.closed = false;
        self.read_effect = None;
        self.write_effect = None;
        self.log.clear();
    }
}

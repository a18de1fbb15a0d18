//! In-memory file-handle doubles for deterministic unit tests.
//!
//! Code under test calls the open primitive through an [`OpenRegistry`],
//! which dispenses shared [`FileHandle`]s backed by [`EmulatedFile`]
//! buffers instead of real storage. Buffers emulate the standard handle
//! contract (read, lines, write, seek, scoped open/close, iteration),
//! every call is recorded for later assertion, and failures can be
//! injected globally, per path, or per handle.
//!
//! ```
//! use filestub::OpenRegistry;
//!
//! let mut registry = OpenRegistry::with_default_contents("foo\nbar\nbaz\n");
//! let file = registry.open_scoped("/etc/motd", "r").unwrap();
//! assert_eq!(file.read_line().unwrap(), "foo\n");
//! assert_eq!(file.read_line().unwrap(), "bar\n");
//! ```

pub mod calls;
pub mod data;
pub mod error;
pub mod file_like;
pub mod handle;
pub mod mode;
pub mod registry;

pub use calls::{CallLog, CallLogFile, CallRecord};
pub use data::{DataKind, FileData};
pub use error::{Error, InjectedFailure};
pub use file_like::{FileLike, ReadEffect, WriteEffect};
pub use handle::{EmulatedFile, FileHandle, LineIter, ScopedFile};
pub use mode::{ModeOp, OpenMode};
pub use registry::{FailurePolicy, OpenRegistry};

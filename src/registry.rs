//! The path-keyed dispenser standing in for the open primitive.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

use log::trace;
use serde_json::json;

use crate::calls::CallLog;
use crate::data::FileData;
use crate::error::{Error, InjectedFailure};
use crate::file_like::FileLike;
use crate::handle::{EmulatedFile, FileHandle, ScopedFile};
use crate::mode::OpenMode;

/// Per-path failure configuration, overriding the global one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Opening this path fails with the given failure.
    Fail(InjectedFailure),
    /// Opening this path succeeds even when a global failure is set.
    Succeed,
}

/// Registry-wide failure configuration.
#[derive(Debug, Clone, Default)]
enum GlobalFailure {
    #[default]
    None,
    /// Every open of a non-exempt path fails.
    Always(InjectedFailure),
    /// One element consumed per open: `Some` fails, `None` succeeds.
    /// Normal behavior resumes once the queue is exhausted.
    Sequence(VecDeque<Option<InjectedFailure>>),
}

/// Dispenses [`FileHandle`]s by path, standing in for the host's
/// file-opening primitive.
///
/// Opens of the same path share one handle; handles can be pre-seeded or
/// replaced before the code under test runs, and failures can be
/// configured globally or per path. The registry records every open call
/// in its own [`CallLog`].
#[derive(Default)]
pub struct OpenRegistry {
    files: HashMap<String, FileHandle>,
    default_contents: FileData,
    last_opened: Option<Weak<RefCell<dyn FileLike>>>,
    global_failure: GlobalFailure,
    path_policies: HashMap<String, FailurePolicy>,
    log: CallLog,
}

impl OpenRegistry {
    /// Creates a registry dispensing empty files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose newly created files start with the given
    /// contents.
    pub fn with_default_contents(data: impl Into<FileData>) -> Self {
        Self { default_contents: data.into(), ..Self::default() }
    }

    /// The contents newly created files are seeded with.
    #[must_use]
    pub fn default_contents(&self) -> &FileData {
        &self.default_contents
    }

    /// Replaces the contents newly created files are seeded with.
    pub fn set_default_contents(&mut self, data: impl Into<FileData>) {
        self.default_contents = data.into();
    }

    /// The dispensing entry point: resolves `path` to its shared handle,
    /// creating one seeded with the default contents when absent, and
    /// applies the path and mode onto it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] for an unparseable mode string, or
    /// [`Error::Injected`] when a configured failure fires (in which case
    /// no registry or handle state changes).
    pub fn open(&mut self, path: &str, mode: &str) -> Result<FileHandle, Error> {
        self.log.record("open", json!({ "path": path, "mode": mode }));
        let mode = OpenMode::parse(mode)?;

        if let Some(failure) = self.next_failure(path) {
            trace!("open {path:?} failing with configured failure");
            return Err(Error::Injected(failure));
        }

        // A handle that was registered generically for another path must
        // not be mutated in place; substitute a fresh one.
        let reusable = self.files.get(path).and_then(|existing| {
            let mismatched = existing.borrow().name().is_some_and(|n| n != path);
            (!mismatched).then(|| Rc::clone(existing))
        });
        let handle = match reusable {
            Some(existing) => existing,
            None => self.register_fresh(path),
        };

        trace!("open {path:?} mode {mode}");
        handle.borrow_mut().assign_identity(path, mode);
        self.last_opened = Some(Rc::downgrade(&handle));
        Ok(handle)
    }

    /// Opens `path` and wraps the handle in a [`ScopedFile`], which
    /// rewinds the cursor now and closes the handle when dropped.
    ///
    /// # Errors
    ///
    /// Same conditions as [`open`](Self::open).
    pub fn open_scoped(&mut self, path: &str, mode: &str) -> Result<ScopedFile, Error> {
        Ok(ScopedFile::new(self.open(path, mode)?))
    }

    /// Indexed lookup: the handle registered for `path`, creating and
    /// registering an empty one (with its name already set) when absent.
    /// Lets tests configure contents or effects before any open call.
    pub fn handle(&mut self, path: &str) -> FileHandle {
        if let Some(existing) = self.files.get(path) {
            return Rc::clone(existing);
        }
        let mut file = EmulatedFile::new();
        file.assign_identity(path, OpenMode::default());
        let handle = file.into_handle();
        self.files.insert(path.to_string(), Rc::clone(&handle));
        handle
    }

    /// Indexed assignment: registers a caller-supplied object for `path`,
    /// replacing any existing handle. The object must honor the
    /// [`FileLike`] contract (in particular acquire/release/close).
    pub fn insert(&mut self, path: impl Into<String>, handle: FileHandle) {
        self.files.insert(path.into(), handle);
    }

    /// The most recently resolved handle, if it is still alive.
    #[must_use]
    pub fn last_opened(&self) -> Option<FileHandle> {
        self.last_opened.as_ref().and_then(Weak::upgrade)
    }

    /// Configures every open of a non-exempt path to fail.
    pub fn fail_all(&mut self, failure: InjectedFailure) {
        self.global_failure = GlobalFailure::Always(failure);
    }

    /// Configures a queue of outcomes consumed one per open: `Some`
    /// fails with that failure, `None` succeeds. Normal behavior resumes
    /// once the queue is exhausted.
    pub fn fail_sequence(&mut self, outcomes: impl IntoIterator<Item = Option<InjectedFailure>>) {
        self.global_failure = GlobalFailure::Sequence(outcomes.into_iter().collect());
    }

    /// Clears the global failure configuration.
    pub fn clear_global_failure(&mut self) {
        self.global_failure = GlobalFailure::None;
    }

    /// Configures opens of `path` to fail, overriding the global
    /// configuration.
    pub fn fail_path(&mut self, path: impl Into<String>, failure: InjectedFailure) {
        self.path_policies.insert(path.into(), FailurePolicy::Fail(failure));
    }

    /// Exempts `path` from any global failure: opening it succeeds.
    pub fn exempt_path(&mut self, path: impl Into<String>) {
        self.path_policies.insert(path.into(), FailurePolicy::Succeed);
    }

    /// Removes the per-path policy for `path`, so it inherits the global
    /// configuration again.
    pub fn clear_path(&mut self, path: &str) {
        self.path_policies.remove(path);
    }

    /// The open calls recorded on this registry.
    #[must_use]
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Clears all registered files, the default contents, every failure
    /// configuration, and the call log.
    pub fn reset(&mut self) {
        self.files.clear();
        self.default_contents = FileData::default();
        self.last_opened = None;
        self.global_failure = GlobalFailure::None;
        self.path_policies.clear();
        self.log.clear();
    }

    /// The failure that should fire for this open, if any. Per-path
    /// policies are consulted first so configuration never leaks between
    /// paths; only an inherited open consumes a sequence element.
    fn next_failure(&mut self, path: &str) -> Option<InjectedFailure> {
        match self.path_policies.get(path) {
            Some(FailurePolicy::Fail(failure)) => Some(failure.clone()),
            Some(FailurePolicy::Succeed) => None,
            None => match &mut self.global_failure {
                GlobalFailure::None => None,
                GlobalFailure::Always(failure) => Some(failure.clone()),
                GlobalFailure::Sequence(queue) => queue.pop_front().flatten(),
            },
        }
    }

    fn register_fresh(&mut self, path: &str) -> FileHandle {
        let handle = EmulatedFile::with_contents(self.default_contents.clone()).into_handle();
        self.files.insert(path.to_string(), Rc::clone(&handle));
        handle
    }
}

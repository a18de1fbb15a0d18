//! Call recording for later assertion.
//!
//! Every operation on a handle (and every open on the registry) is
//! recorded as a `(method, arguments)` tuple. Tests inspect the log in
//! memory or export it as a YAML document for golden-file comparison.

pub mod format;
pub mod log;

pub use format::{CallLogFile, CallRecord};
pub use log::CallLog;

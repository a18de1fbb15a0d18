//! Data structures for recorded calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a handle or registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    /// Sequence number (assigned automatically by the log).
    pub seq: u64,
    /// Method name invoked (e.g. "read", "write", "open").
    pub method: String,
    /// Arguments the method was invoked with.
    pub input: serde_json::Value,
}

/// A call log as written to disk for golden-file assertions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallLogFile {
    /// Name of the handle or registry the calls were recorded on.
    pub name: String,
    /// When the log was exported.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of calls.
    pub calls: Vec<CallRecord>,
}

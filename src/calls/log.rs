//! In-memory call log attached to every handle and registry.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{CallLogFile, CallRecord};

/// Records calls in order and answers assertion queries about them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CallLog {
    records: Vec<CallRecord>,
    next_seq: u64,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call. The `seq` field is assigned automatically.
    pub fn record(&mut self, method: impl Into<String>, input: serde_json::Value) {
        let record = CallRecord { seq: self.next_seq, method: method.into(), input };
        self.next_seq += 1;
        self.records.push(record);
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[CallRecord] {
        &self.records
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of calls recorded for the given method.
    #[must_use]
    pub fn count_of(&self, method: &str) -> usize {
        self.records.iter().filter(|r| r.method == method).count()
    }

    /// The most recent call, if any.
    #[must_use]
    pub fn last(&self) -> Option<&CallRecord> {
        self.records.last()
    }

    /// Clears all recorded calls and restarts sequence numbering.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_seq = 0;
    }

    /// Exports the log as a YAML document under the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self, name: impl Into<String>) -> Result<String, serde_yaml::Error> {
        let file = CallLogFile {
            name: name.into(),
            recorded_at: Utc::now(),
            calls: self.records.clone(),
        };
        serde_yaml::to_string(&file)
    }

    /// Writes the log as a YAML file for golden-file assertions.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path, name: impl Into<String>) -> Result<PathBuf, std::io::Error> {
        let yaml = self.to_yaml(name).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)?;
        Ok(path.to_path_buf())
    }
}

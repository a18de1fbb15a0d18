//! Buffer payload types: text or binary data flowing through a handle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a buffer (or a piece of data) is text or binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// UTF-8 text; lengths and cursor offsets count characters.
    Text,
    /// Raw bytes; lengths and cursor offsets count bytes.
    Binary,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// A chunk of file content, either text or bytes.
///
/// This is the unit passed to `write` and returned from the read
/// operations. The variant must match the buffer's kind; mixing them is a
/// type-mismatch error rather than an implicit conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum FileData {
    /// Text content.
    Text(String),
    /// Binary content.
    Bytes(Vec<u8>),
}

impl FileData {
    /// An empty payload of the given kind.
    #[must_use]
    pub fn empty(kind: DataKind) -> Self {
        match kind {
            DataKind::Text => Self::Text(String::new()),
            DataKind::Binary => Self::Bytes(Vec::new()),
        }
    }

    /// The kind of this payload.
    #[must_use]
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Text(_) => DataKind::Text,
            Self::Bytes(_) => DataKind::Binary,
        }
    }

    /// Length in cursor units: characters for text, bytes for binary.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Bytes(b) => b.len(),
        }
    }

    /// `true` when the payload holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
        }
    }

    /// Converts the payload to the given kind, if it differs.
    ///
    /// Text becomes its UTF-8 encoding; bytes become text via lossy UTF-8
    /// decoding. Reopening a handle under a mode of the other kind performs
    /// this conversion silently.
    #[must_use]
    pub fn convert(self, kind: DataKind) -> Self {
        match (self, kind) {
            (Self::Text(s), DataKind::Binary) => Self::Bytes(s.into_bytes()),
            (Self::Bytes(b), DataKind::Text) => {
                Self::Text(String::from_utf8_lossy(&b).into_owned())
            }
            (same, _) => same,
        }
    }

    /// Borrows the text content, or `None` for binary payloads.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(_) => None,
        }
    }

    /// Borrows the byte content, or `None` for text payloads.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[u8]> {
        match self {
            Self::Text(_) => None,
            Self::Bytes(b) => Some(b),
        }
    }

    /// The payload as a JSON value for call-log inputs.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Bytes(b) => serde_json::json!(b),
        }
    }
}

impl Default for FileData {
    /// An empty text payload, the kind a fresh handle starts with.
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FileData {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FileData {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&[u8]> for FileData {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for FileData {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl PartialEq<&str> for FileData {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<&[u8]> for FileData {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == Some(*other)
    }
}

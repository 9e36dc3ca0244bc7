//! Generic deserialized document value
//!
//! This is what a document deserializer hands to the tree builder. It knows
//! nothing about the outline convention.

use std::fmt;

/// Untyped nested value produced by a document deserializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Any leaf value, rendered as text
    Scalar(String),
    /// Ordered key/value pairs, keys unique
    Mapping(Vec<(String, RawValue)>),
    /// Ordered list of values
    Sequence(Vec<RawValue>),
}

impl RawValue {
    pub fn scalar(text: impl Into<String>) -> Self {
        RawValue::Scalar(text.into())
    }

    /// Look up the first entry with `key` in a mapping.
    ///
    /// Returns None for scalars and sequences.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            RawValue::Scalar(_) | RawValue::Sequence(_) => None,
        }
    }

    /// Short description of the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Scalar(_) => "scalar",
            RawValue::Mapping(_) => "mapping",
            RawValue::Sequence(_) => "sequence",
        }
    }
}

// Documents may nest far deeper than the builder accepts. Dropping them
// must not recurse once per level.
impl Drop for RawValue {
    fn drop(&mut self) {
        let mut pending: Vec<RawValue> = match self {
            RawValue::Scalar(_) => return,
            RawValue::Sequence(items) => std::mem::take(items),
            RawValue::Mapping(entries) => std::mem::take(entries)
                .into_iter()
                .map(|(_, value)| value)
                .collect(),
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                RawValue::Scalar(_) => {}
                RawValue::Sequence(items) => pending.append(items),
                RawValue::Mapping(entries) => {
                    pending.extend(entries.drain(..).map(|(_, value)| value))
                }
            }
        }
    }
}

/// Position of a syntax error in the source text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Failure to turn text into a [`RawValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    pub message: String,
    pub location: Option<DocumentLocation>,
}

impl DocumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            location: Some(DocumentLocation { line, column }),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} at {}", self.message, loc),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DocumentError {}

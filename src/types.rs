//! Type definitions for parse output

use indexmap::IndexMap;
use std::fmt;

/// One unit of parser output, tagged with its originating line index
///
/// Successful rows and classified errors travel through the same sink
/// channel, interleaved in strict line order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseEvent {
    /// A row successfully bound to the header (or passed through positionally)
    Record(Record),
    /// A classified, non-fatal error; the offending line was skipped
    Error(RowError),
}

impl ParseEvent {
    pub(crate) fn record(index: u64, data: RecordData) -> Self {
        ParseEvent::Record(Record { index, data })
    }

    pub(crate) fn error(index: u64, code: ErrorCode, message: String) -> Self {
        ParseEvent::Error(RowError {
            index,
            code,
            message,
        })
    }

    /// Line index this event originated from
    pub fn index(&self) -> u64 {
        match self {
            ParseEvent::Record(r) => r.index,
            ParseEvent::Error(e) => e.index,
        }
    }

    /// Get the record if this event is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ParseEvent::Record(r) => Some(r),
            ParseEvent::Error(_) => None,
        }
    }

    /// Get the error if this event is one
    pub fn as_error(&self) -> Option<&RowError> {
        match self {
            ParseEvent::Record(_) => None,
            ParseEvent::Error(e) => Some(e),
        }
    }
}

/// A successfully parsed row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
    /// 1-based line index in the original input
    pub index: u64,
    /// Field values, named or positional depending on header mode
    pub data: RecordData,
}

/// Field values of one record
///
/// `Named` preserves header order on iteration (and serialization, with the
/// `serde` feature enabled).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RecordData {
    /// Header field name -> value, in header order
    Named(IndexMap<String, String>),
    /// Values in field order (header mode disabled)
    Positional(Vec<String>),
}

impl RecordData {
    /// Look up a value by header field name
    ///
    /// Returns `None` for positional records.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            RecordData::Named(map) => map.get(name).map(String::as_str),
            RecordData::Positional(_) => None,
        }
    }

    /// Look up a value by field position
    pub fn get_index(&self, idx: usize) -> Option<&str> {
        match self {
            RecordData::Named(map) => map.get_index(idx).map(|(_, v)| v.as_str()),
            RecordData::Positional(values) => values.get(idx).map(String::as_str),
        }
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        match self {
            RecordData::Named(map) => map.len(),
            RecordData::Positional(values) => values.len(),
        }
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field values in order, regardless of mode
    pub fn values(&self) -> Vec<&str> {
        match self {
            RecordData::Named(map) => map.values().map(String::as_str).collect(),
            RecordData::Positional(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<Vec<String>> for RecordData {
    fn from(values: Vec<String>) -> Self {
        RecordData::Positional(values)
    }
}

impl From<IndexMap<String, String>> for RecordData {
    fn from(map: IndexMap<String, String>) -> Self {
        RecordData::Named(map)
    }
}

/// A classified, non-fatal error for one skipped line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowError {
    /// 1-based line index in the original input
    pub index: u64,
    /// Error classification
    pub code: ErrorCode,
    /// Human-readable detail, including observed/expected counts for
    /// field-count mismatches
    pub message: String,
}

/// Classification of non-fatal parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorCode {
    /// A line matched the configured comment prefix
    CommentExists,
    /// A line was empty
    EmptyLineExists,
    /// Row had more fields than the header
    FieldsMismatchTooMany,
    /// Row had fewer fields than the header
    FieldsMismatchTooFew,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::CommentExists => "CommentExists",
            ErrorCode::EmptyLineExists => "EmptyLineExists",
            ErrorCode::FieldsMismatchTooMany => "FieldsMismatchTooMany",
            ErrorCode::FieldsMismatchTooFew => "FieldsMismatchTooFew",
        };
        write!(f, "{}", name)
    }
}

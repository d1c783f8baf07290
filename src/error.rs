//! Error types for CSV parsing

use thiserror::Error;

/// Fatal parse errors
///
/// Everything recoverable (comments, empty lines, field-count mismatches)
/// is reported as a [`crate::types::RowError`] event through the sink and
/// never aborts the parse. This enum covers the single condition that does:
/// a quoted field whose closing quote never arrives, even after the final
/// flush.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// An opening quote was never closed by the end of input
    #[error("quoted field malformed: no closing quote before end of input (line {line})")]
    QuotedFieldMalformed {
        /// 1-based index of the line holding the unterminated field
        line: u64,
    },
}

/// Result type for CSV operations
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CsvError::QuotedFieldMalformed { line: 7 };
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("closing quote"));
    }
}

//! Row-to-record binding and header handling
//!
//! The binder owns the line index and the header for one parse session.
//! Every logical line consumed from the input advances the index exactly
//! once, whether it produces a record, a classified error, or nothing.

use crate::types::{ErrorCode, ParseEvent, RecordData};
use crate::HeaderMode;
use indexmap::IndexMap;

/// Binds tokenized rows to output events and classifies mismatches
pub(crate) struct RowBinder {
    header: HeaderState,
    /// Initial mode, kept so a parser can be reset between sessions
    initial: HeaderMode,
    idx: u64,
    error_on_fields_mismatch: bool,
}

enum HeaderState {
    /// Auto mode, header not yet captured
    Detect,
    /// Header established, fixed for the rest of the session
    Bound(Vec<String>),
    /// Header mode disabled, rows pass through positionally
    Positional,
}

impl HeaderState {
    fn from_mode(mode: HeaderMode) -> Self {
        match mode {
            HeaderMode::Auto => HeaderState::Detect,
            HeaderMode::Explicit(names) => HeaderState::Bound(names),
            HeaderMode::None => HeaderState::Positional,
        }
    }
}

impl RowBinder {
    pub(crate) fn new(mode: HeaderMode, error_on_fields_mismatch: bool) -> Self {
        RowBinder {
            header: HeaderState::from_mode(mode.clone()),
            initial: mode,
            idx: 0,
            error_on_fields_mismatch,
        }
    }

    /// Current line index (count of logical lines consumed so far)
    pub(crate) fn line_index(&self) -> u64 {
        self.idx
    }

    /// Consume one logical line that produces no row (comment, empty line)
    pub(crate) fn advance_line(&mut self) -> u64 {
        self.idx += 1;
        self.idx
    }

    /// Header field names, once established
    pub(crate) fn header(&self) -> Option<&[String]> {
        match &self.header {
            HeaderState::Bound(names) => Some(names),
            _ => None,
        }
    }

    /// Discard session state, restoring the configured header mode
    pub(crate) fn reset(&mut self) {
        self.header = HeaderState::from_mode(self.initial.clone());
        self.idx = 0;
    }

    /// Bind one tokenized row to an output event
    ///
    /// Adopts the row as the header in auto mode, emits a mapped or
    /// positional record, or classifies a field-count mismatch. Mismatched
    /// rows are dropped whether or not the error event is enabled.
    pub(crate) fn bind_row(&mut self, row: Vec<String>, sink: &mut dyn FnMut(ParseEvent)) {
        self.idx += 1;

        if matches!(self.header, HeaderState::Detect) {
            self.header = HeaderState::Bound(row);
            return;
        }

        match &self.header {
            HeaderState::Bound(names) => {
                if names.len() != row.len() {
                    if self.error_on_fields_mismatch {
                        let (code, message) = if row.len() > names.len() {
                            (
                                ErrorCode::FieldsMismatchTooMany,
                                format!(
                                    "Too many fields were parsed, {}, expected {}.",
                                    row.len(),
                                    names.len()
                                ),
                            )
                        } else {
                            (
                                ErrorCode::FieldsMismatchTooFew,
                                format!(
                                    "Too few fields were parsed, {}, expected {}.",
                                    row.len(),
                                    names.len()
                                ),
                            )
                        };
                        sink(ParseEvent::error(self.idx, code, message));
                    }
                    return;
                }
                let data: IndexMap<String, String> =
                    names.iter().cloned().zip(row).collect();
                sink(ParseEvent::record(self.idx, RecordData::Named(data)));
            }
            HeaderState::Positional => {
                sink(ParseEvent::record(self.idx, RecordData::Positional(row)));
            }
            HeaderState::Detect => unreachable!("header captured above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn collect_events(binder: &mut RowBinder, rows: Vec<Vec<String>>) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        let mut sink = |event: ParseEvent| events.push(event);
        for r in rows {
            binder.bind_row(r, &mut sink);
        }
        events
    }

    #[test]
    fn test_auto_header_captures_first_row() {
        let mut binder = RowBinder::new(HeaderMode::Auto, true);
        let events = collect_events(
            &mut binder,
            vec![row(&["a", "b"]), row(&["1", "2"])],
        );

        assert_eq!(binder.header(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(events.len(), 1);
        let record = events[0].as_record().unwrap();
        assert_eq!(record.index, 2);
        assert_eq!(record.data.get("a"), Some("1"));
        assert_eq!(record.data.get("b"), Some("2"));
    }

    #[test]
    fn test_explicit_header_binds_every_row() {
        let mut binder = RowBinder::new(HeaderMode::Explicit(row(&["x", "y"])), true);
        let events = collect_events(&mut binder, vec![row(&["1", "2"])]);

        assert_eq!(events.len(), 1);
        let record = events[0].as_record().unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(record.data.get("x"), Some("1"));
    }

    #[test]
    fn test_positional_mode_passes_rows_through() {
        let mut binder = RowBinder::new(HeaderMode::None, true);
        let events = collect_events(&mut binder, vec![row(&["1", "2", "3"])]);

        let record = events[0].as_record().unwrap();
        assert_eq!(
            record.data,
            RecordData::Positional(row(&["1", "2", "3"]))
        );
    }

    #[test]
    fn test_too_many_fields_classified() {
        let mut binder = RowBinder::new(HeaderMode::Explicit(row(&["a", "b"])), true);
        let events = collect_events(&mut binder, vec![row(&["1", "2", "3"])]);

        assert_eq!(events.len(), 1);
        let error = events[0].as_error().unwrap();
        assert_eq!(error.code, ErrorCode::FieldsMismatchTooMany);
        assert!(error.message.contains("3"));
        assert!(error.message.contains("2"));
    }

    #[test]
    fn test_too_few_fields_classified() {
        let mut binder = RowBinder::new(HeaderMode::Explicit(row(&["a", "b", "c"])), true);
        let events = collect_events(&mut binder, vec![row(&["1"])]);

        let error = events[0].as_error().unwrap();
        assert_eq!(error.code, ErrorCode::FieldsMismatchTooFew);
    }

    #[test]
    fn test_mismatch_dropped_silently_when_disabled() {
        let mut binder = RowBinder::new(HeaderMode::Explicit(row(&["a", "b"])), false);
        let events = collect_events(&mut binder, vec![row(&["1", "2", "3"])]);

        assert!(events.is_empty());
        // The dropped row still consumed a line index
        assert_eq!(binder.line_index(), 1);
    }

    #[test]
    fn test_line_index_counts_every_row() {
        let mut binder = RowBinder::new(HeaderMode::Auto, true);
        collect_events(
            &mut binder,
            vec![row(&["h"]), row(&["1"]), row(&["2"])],
        );
        assert_eq!(binder.line_index(), 3);

        binder.advance_line();
        assert_eq!(binder.line_index(), 4);
    }

    #[test]
    fn test_reset_restores_auto_detection() {
        let mut binder = RowBinder::new(HeaderMode::Auto, true);
        collect_events(&mut binder, vec![row(&["a"]), row(&["1"])]);
        assert!(binder.header().is_some());

        binder.reset();
        assert_eq!(binder.line_index(), 0);
        assert!(binder.header().is_none());
    }

    #[test]
    fn test_reset_keeps_explicit_header() {
        let names = row(&["a", "b"]);
        let mut binder = RowBinder::new(HeaderMode::Explicit(names.clone()), true);
        collect_events(&mut binder, vec![row(&["1", "2"])]);

        binder.reset();
        assert_eq!(binder.header(), Some(&names[..]));
    }
}

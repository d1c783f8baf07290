//! Fast-path tokenizer with no quote awareness
//!
//! A plain terminator/delimiter split for inputs guaranteed to contain no
//! quoted fields. Roughly line-oriented `split` performance; fields that
//! embed the delimiter or terminator will be split incorrectly, so callers
//! must know their data.

use crate::scanner::ChunkParser;
use crate::types::{ErrorCode, ParseEvent};

impl ChunkParser {
    /// Tokenize one chunk by plain delimiter search, without quote handling
    ///
    /// On non-flush calls the final element of the terminator split is
    /// always deferred into the carry buffer, since it may continue in the
    /// next chunk; callers must prepend [`ChunkParser::carry`] to the next
    /// chunk themselves. A flush call processes every element, treating end
    /// of input as the last terminator.
    pub fn parse_chunk_fast(&mut self, chunk: &str, flush: bool, sink: &mut dyn FnMut(ParseEvent)) {
        self.carry.clear();
        let mut lines: Vec<&str> = chunk.split(self.opts.newline.as_str()).collect();
        if !flush {
            // split always yields at least one element
            let deferred = lines.pop().unwrap_or("");
            self.carry.push_str(deferred);
        } else if lines.last() == Some(&"") {
            // trailing terminator, not a logical line
            lines.pop();
        }

        let count = lines.len();
        for line in lines {
            if let Some(prefix) = &self.opts.comment_prefix {
                if line.starts_with(prefix.as_str()) {
                    self.binder.advance_line();
                    if self.opts.error_on_comment {
                        sink(ParseEvent::error(
                            self.binder.line_index(),
                            ErrorCode::CommentExists,
                            "Comment detected.".to_string(),
                        ));
                    }
                    continue;
                }
            }
            if line.is_empty() {
                self.binder.advance_line();
                // `count > 1` avoids a false positive when the whole input
                // is a lone terminator
                if self.opts.error_on_empty_line && count > 1 {
                    sink(ParseEvent::error(
                        self.binder.line_index(),
                        ErrorCode::EmptyLineExists,
                        "Empty line detected.".to_string(),
                    ));
                }
                continue;
            }
            let row: Vec<String> = line
                .split(self.opts.delimiter)
                .map(|field| self.opts.transform_field(field.to_string()))
                .collect();
            self.binder.bind_row(row, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordData;
    use crate::{HeaderMode, ParseOptions};

    fn parser(options: ParseOptions) -> ChunkParser {
        ChunkParser::new(options.newline("\n"))
    }

    fn run(parser: &mut ChunkParser, chunk: &str, flush: bool) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        parser.parse_chunk_fast(chunk, flush, &mut |event| events.push(event));
        events
    }

    fn positional(event: &ParseEvent) -> Vec<String> {
        match &event.as_record().unwrap().data {
            RecordData::Positional(values) => values.clone(),
            RecordData::Named(_) => panic!("expected positional record"),
        }
    }

    #[test]
    fn test_simple_rows() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "a,b\n1,2\n", true);

        assert_eq!(events.len(), 2);
        assert_eq!(positional(&events[0]), vec!["a", "b"]);
        assert_eq!(positional(&events[1]), vec!["1", "2"]);
    }

    #[test]
    fn test_trailing_fragment_always_deferred() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "a,b\n1,", false);

        assert_eq!(events.len(), 1);
        assert_eq!(p.carry(), "1,");

        // A chunk with no terminator at all defers everything
        let events = run(&mut p, "unfinished", false);
        assert!(events.is_empty());
        assert_eq!(p.carry(), "unfinished");
    }

    #[test]
    fn test_flush_processes_final_fragment() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "a,b\n1,2", true);

        assert_eq!(events.len(), 2);
        assert_eq!(positional(&events[1]), vec!["1", "2"]);
        assert_eq!(p.carry(), "");
    }

    #[test]
    fn test_carry_prepended_by_caller_completes_row() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        run(&mut p, "a,b\n1,", false);

        let chunk = format!("{}{}", p.take_carry(), "2\n3,4\n");
        let events = run(&mut p, &chunk, true);
        assert_eq!(events.len(), 2);
        assert_eq!(positional(&events[0]), vec!["1", "2"]);
        assert_eq!(positional(&events[1]), vec!["3", "4"]);
    }

    #[test]
    fn test_header_binding_via_fast_path() {
        let mut p = parser(ParseOptions::new());
        let events = run(&mut p, "a,b\n1,2\n", true);

        assert_eq!(events.len(), 1);
        let record = events[0].as_record().unwrap();
        assert_eq!(record.index, 2);
        assert_eq!(record.data.get("a"), Some("1"));
    }

    #[test]
    fn test_comment_lines_skipped() {
        let mut p = parser(
            ParseOptions::new()
                .header(HeaderMode::None)
                .comment_prefix("#"),
        );
        let events = run(&mut p, "# note\na\n", true);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_error().unwrap().code, ErrorCode::CommentExists);
        assert_eq!(positional(&events[1]), vec!["a"]);
        assert_eq!(events[1].index(), 2);
    }

    #[test]
    fn test_empty_line_error_suppressed_for_lone_terminator() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "\n", true);

        // Index advances, but no EmptyLineExists for the trailing fragment
        assert!(events.is_empty());
        assert_eq!(p.line_index(), 1);
    }

    #[test]
    fn test_interior_empty_line_reported() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "a\n\nb\n", true);

        assert_eq!(events.len(), 3);
        assert_eq!(events[1].as_error().unwrap().code, ErrorCode::EmptyLineExists);
        assert_eq!(events[2].index(), 3);
    }

    #[test]
    fn test_no_quote_interpretation() {
        let mut p = parser(ParseOptions::new().header(HeaderMode::None));
        let events = run(&mut p, "\"a,b\",c\n", true);

        // Quotes are plain data on the fast path
        assert_eq!(positional(&events[0]), vec!["\"a", "b\"", "c"]);
    }

    #[test]
    fn test_empty_field_value_applied() {
        let mut p = parser(
            ParseOptions::new()
                .header(HeaderMode::None)
                .empty_field_value("?"),
        );
        let events = run(&mut p, "a,,c\n", true);

        assert_eq!(positional(&events[0]), vec!["a", "?", "c"]);
    }
}

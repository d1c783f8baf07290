//! Chunk parser with quote/escape-aware scanning
//!
//! [`ChunkParser`] is the stateful engine behind both entry points. Callers
//! feed it bounded chunks of text; any line (or quoted field) that cannot be
//! fully tokenized within the current chunk is held back byte-exact in a
//! carry buffer, to be prepended to the next chunk. The final call passes
//! `flush = true`, forcing resolution of the carried text: a trailing line
//! with no terminator is still emitted, and a quoted field that never
//! closed becomes the one fatal error.
//!
//! Two escaping conventions are supported, selected once at configuration
//! time: a doubled quote when the escape character equals the quote
//! character, and an escape-prefixed quote otherwise.
//!
//! # Examples
//!
//! ```
//! use csvstream::{ChunkParser, ParseOptions, HeaderMode};
//!
//! let options = ParseOptions::new().newline("\n").header(HeaderMode::None);
//! let mut parser = ChunkParser::new(options);
//!
//! let mut rows = Vec::new();
//! parser.parse_chunk("a,b\n1,", false, &mut |event| rows.push(event)).unwrap();
//! assert_eq!(rows.len(), 1); // "1," is carried, not dropped
//! assert_eq!(parser.carry(), "1,");
//! ```

use crate::binder::RowBinder;
use crate::error::{CsvError, Result};
use crate::options::{ParseOptions, ResolvedOptions};
use crate::types::{ErrorCode, ParseEvent};

/// Find a string pattern at or after `from`, returning its absolute offset
fn find_str(chunk: &str, pattern: &str, from: usize) -> Option<usize> {
    chunk.get(from..)?.find(pattern).map(|pos| pos + from)
}

/// Find a character at or after `from`, returning its absolute offset
fn find_char(chunk: &str, pattern: char, from: usize) -> Option<usize> {
    chunk.get(from..)?.find(pattern).map(|pos| pos + from)
}

/// Stateful chunk-at-a-time CSV parser
///
/// Owns the header, line index, and partial-line carry buffer for one parse
/// session. Events (records and classified errors) are delivered to the
/// sink callback synchronously, in strict line order.
pub struct ChunkParser {
    pub(crate) opts: ResolvedOptions,
    pub(crate) binder: RowBinder,
    pub(crate) carry: String,
}

impl ChunkParser {
    /// Create a parser from options
    pub fn new(options: ParseOptions) -> Self {
        let opts = options.resolve();
        let binder = RowBinder::new(opts.header.clone(), opts.error_on_fields_mismatch);
        ChunkParser {
            opts,
            binder,
            carry: String::new(),
        }
    }

    /// Text held over from the previous chunk because a line or quoted
    /// field was incomplete
    ///
    /// Callers driving the parser themselves must prepend this to the next
    /// chunk before the next `parse_chunk` call.
    pub fn carry(&self) -> &str {
        &self.carry
    }

    /// Take the carry buffer, leaving it empty
    pub fn take_carry(&mut self) -> String {
        std::mem::take(&mut self.carry)
    }

    /// Header field names, once established by detection or configuration
    pub fn header(&self) -> Option<&[String]> {
        self.binder.header()
    }

    /// Count of logical lines consumed so far, including skipped ones
    pub fn line_index(&self) -> u64 {
        self.binder.line_index()
    }

    /// Discard all session state (carry, line index, detected header) so
    /// the parser can run another input with the same configuration
    pub fn reset(&mut self) {
        self.carry.clear();
        self.binder.reset();
    }

    /// Tokenize one chunk with full quote/escape awareness
    ///
    /// Intermediate calls pass `flush = false`; the final call passes
    /// `flush = true` to signal no further text will arrive. On a flush
    /// call, the end of the chunk stands in for a missing trailing
    /// terminator, and an unterminated quoted field returns
    /// [`CsvError::QuotedFieldMalformed`].
    pub fn parse_chunk(
        &mut self,
        chunk: &str,
        flush: bool,
        sink: &mut dyn FnMut(ParseEvent),
    ) -> Result<()> {
        self.carry.clear();
        let len = chunk.len();
        let mut cursor = 0usize;
        let mut row: Vec<String> = Vec::new();

        self.skip_inert_lines(chunk, &mut cursor, flush, sink);
        let mut line_start = cursor;

        loop {
            // Between rows with nothing left, the chunk is exhausted. A
            // non-empty row means a trailing field is still owed (flush
            // input ending in a delimiter).
            if cursor >= len && row.is_empty() {
                break;
            }

            let mut quoted = false;
            let mut search_from = cursor;
            if chunk[cursor..].starts_with(self.opts.quote) {
                cursor += self.opts.quote.len_utf8();
                quoted = true;
                search_from = cursor;
                loop {
                    let quote_at = match find_char(chunk, self.opts.quote, search_from) {
                        Some(pos) => pos,
                        None => {
                            // The closing quote may arrive in a later
                            // chunk; carry the whole line so it can be
                            // re-scanned against the longer text.
                            self.carry.push_str(&chunk[line_start..]);
                            if flush {
                                return Err(CsvError::QuotedFieldMalformed {
                                    line: self.binder.line_index() + 1,
                                });
                            }
                            return Ok(());
                        }
                    };
                    let after = quote_at + self.opts.quote.len_utf8();
                    if self.opts.escape_is_quote && chunk[after..].starts_with(self.opts.quote) {
                        search_from = after + self.opts.quote.len_utf8();
                        continue;
                    }
                    if !self.opts.escape_is_quote && chunk[..quote_at].ends_with(self.opts.escape) {
                        search_from = after;
                        continue;
                    }
                    search_from = quote_at;
                    break;
                }
            }

            let next_delimiter = find_char(chunk, self.opts.delimiter, search_from);
            let next_newline = match find_str(chunk, &self.opts.newline, search_from) {
                Some(pos) => pos,
                None if flush => len,
                None => {
                    self.carry.push_str(&chunk[line_start..]);
                    return Ok(());
                }
            };
            let (field_end, separator_len, at_newline) = match next_delimiter {
                Some(pos) if pos < next_newline => (pos, self.opts.delimiter.len_utf8(), false),
                _ => (next_newline, self.opts.newline.len(), true),
            };

            let field = if quoted {
                let raw = &chunk[cursor..field_end - self.opts.quote.len_utf8()];
                if raw.contains(&self.opts.escaped_quote) {
                    raw.replace(&self.opts.escaped_quote, &self.opts.quote_str)
                } else {
                    raw.to_string()
                }
            } else {
                chunk[cursor..field_end].to_string()
            };
            row.push(self.opts.transform_field(field));
            cursor = field_end + separator_len;

            if at_newline {
                self.binder.bind_row(std::mem::take(&mut row), sink);
                self.skip_inert_lines(chunk, &mut cursor, flush, sink);
                line_start = cursor;
            }
        }
        Ok(())
    }

    /// Consume a run of empty and comment lines at the cursor
    ///
    /// Iterative rather than recursive: a chunk may open with an
    /// arbitrarily long run of blank or comment lines.
    fn skip_inert_lines(
        &mut self,
        chunk: &str,
        cursor: &mut usize,
        flush: bool,
        sink: &mut dyn FnMut(ParseEvent),
    ) {
        loop {
            let rest = chunk.get(*cursor..).unwrap_or("");
            if rest.starts_with(self.opts.newline.as_str()) {
                self.binder.advance_line();
                *cursor += self.opts.newline.len();
                if self.opts.error_on_empty_line {
                    sink(ParseEvent::error(
                        self.binder.line_index(),
                        ErrorCode::EmptyLineExists,
                        "Empty line detected.".to_string(),
                    ));
                }
                continue;
            }
            if let Some(prefix) = &self.opts.comment_prefix {
                if rest.starts_with(prefix.as_str()) {
                    match rest.find(self.opts.newline.as_str()) {
                        Some(pos) => {
                            self.binder.advance_line();
                            *cursor += pos + self.opts.newline.len();
                        }
                        None if flush => {
                            self.binder.advance_line();
                            *cursor = chunk.len();
                        }
                        // The comment may continue in the next chunk;
                        // leave it for the carry mechanism.
                        None => break,
                    }
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
            break;
        }
    }
}

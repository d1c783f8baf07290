//! Chunk-assembly driver for parsing a full in-memory input
//!
//! Feeds the input through [`ChunkParser`] in bounded windows, prepending
//! the carried partial line before each call, then performs one final flush
//! pass so a trailing line with no terminator is still emitted.

use crate::error::Result;
use crate::options::ParseOptions;
use crate::scanner::ChunkParser;
use crate::types::{ParseEvent, RecordData};

/// Parse a full in-memory input, delivering every event to `sink`
///
/// The input is processed in windows of `chunk_size` bytes (widened to the
/// next character boundary), so memory for tokenization stays bounded by
/// the window plus the longest carried line. Events reach the sink in
/// strict line order as soon as they are known.
///
/// Returns the collected record data in input order when
/// [`ParseOptions::collect_records`] is enabled (the default), `None`
/// otherwise. The only error is the fatal unterminated-quote condition.
///
/// # Examples
///
/// ```
/// use csvstream::{parse, ParseOptions};
///
/// let options = ParseOptions::new().newline("\n");
/// let records = parse("a,b\n1,2\n3,4", options, |_event| {})?
///     .expect("collection enabled by default");
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get("a"), Some("1"));
/// assert_eq!(records[1].get("b"), Some("4"));
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub fn parse<F>(input: &str, options: ParseOptions, mut sink: F) -> Result<Option<Vec<RecordData>>>
where
    F: FnMut(ParseEvent),
{
    let mut parser = ChunkParser::new(options);
    let chunk_size = parser.opts.chunk_size.max(1);
    let mut collected = parser.opts.collect_records.then(Vec::new);

    let mut deliver = |event: ParseEvent| {
        if let (Some(records), ParseEvent::Record(record)) = (collected.as_mut(), &event) {
            records.push(record.data.clone());
        }
        sink(event);
    };

    let mut position = 0;
    while position < input.len() {
        let mut end = (position + chunk_size).min(input.len());
        // widen to a character boundary so every window is valid UTF-8
        while !input.is_char_boundary(end) {
            end += 1;
        }
        let mut chunk = parser.take_carry();
        chunk.push_str(&input[position..end]);
        parser.parse_chunk(&chunk, false, &mut deliver)?;
        position = end;
    }

    // Final flush resolves any carried partial line
    let tail = parser.take_carry();
    parser.parse_chunk(&tail, true, &mut deliver)?;

    Ok(collected)
}

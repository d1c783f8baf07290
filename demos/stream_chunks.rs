//! Driving the parser with externally timed chunks
//!
//! Simulates a caller that receives text in arbitrary pieces (network
//! frames, pipe reads) and owns the chunk loop itself: prepend the carry,
//! parse, and flush once the source is exhausted.
//!
//! Run with: cargo run --example stream_chunks

use csvstream::{ChunkParser, ParseEvent, ParseOptions};

fn main() -> csvstream::Result<()> {
    // Chunk boundaries fall mid-field and mid-quote on purpose
    let arriving_chunks = [
        "city,country\nTok",
        "yo,Japan\n\"Rio de",
        " Janeiro\",Brazil\nOslo,Nor",
        "way",
    ];

    let mut parser = ChunkParser::new(ParseOptions::new().newline("\n"));
    let mut print_event = |event: ParseEvent| match event {
        ParseEvent::Record(record) => {
            println!("line {}: {:?}", record.index, record.data.values())
        }
        ParseEvent::Error(error) => {
            eprintln!("line {}: {}", error.index, error.code)
        }
    };

    for incoming in arriving_chunks {
        let mut chunk = parser.take_carry();
        chunk.push_str(incoming);
        parser.parse_chunk(&chunk, false, &mut print_event)?;
        if !parser.carry().is_empty() {
            println!("  (carrying {} bytes)", parser.carry().len());
        }
    }

    // No more chunks: flush resolves the carried trailing line
    let tail = parser.take_carry();
    parser.parse_chunk(&tail, true, &mut print_event)?;

    println!("total lines consumed: {}", parser.line_index());
    Ok(())
}

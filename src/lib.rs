//! # csvstream
//!
//! Incremental chunk-based CSV parsing with bounded memory usage.
//!
//! Delimited text is tokenized one bounded chunk at a time instead of all
//! at once; an incomplete trailing line is carried byte-exact across chunk
//! boundaries, so arbitrarily large inputs never require the whole token
//! stream in memory. Malformed rows (wrong field counts, stray comments,
//! empty lines) become classified error events instead of aborting the
//! parse.
//!
//! ## Quick Start
//!
//! ```
//! use csvstream::{parse, ParseOptions};
//!
//! let options = ParseOptions::new().newline("\n");
//! let records = parse("name,age\nAlice,30\nBob,25", options, |_event| {})?
//!     .unwrap();
//!
//! assert_eq!(records[0].get("name"), Some("Alice"));
//! assert_eq!(records[1].get("age"), Some("25"));
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Streaming
//!
//! Callers who own their chunk arrival timing drive [`ChunkParser`]
//! directly, prepending the carry buffer to each incoming chunk and
//! finishing with a flush call:
//!
//! ```
//! use csvstream::{ChunkParser, ParseOptions, HeaderMode};
//!
//! let mut parser = ChunkParser::new(
//!     ParseOptions::new().newline("\n").header(HeaderMode::None),
//! );
//! let mut rows = Vec::new();
//!
//! for incoming in ["a,b\n1,", "2\n"] {
//!     let mut chunk = parser.take_carry();
//!     chunk.push_str(incoming);
//!     parser.parse_chunk(&chunk, false, &mut |event| rows.push(event))?;
//! }
//! let tail = parser.take_carry();
//! parser.parse_chunk(&tail, true, &mut |event| rows.push(event))?;
//!
//! assert_eq!(rows.len(), 2);
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize` for event and record types

mod binder;
mod fast;

pub mod driver;
pub mod error;
pub mod options;
pub mod scanner;
pub mod types;

pub use driver::parse;
pub use error::{CsvError, Result};
pub use options::{HeaderMode, ParseOptions};
pub use scanner::ChunkParser;
pub use types::{ErrorCode, ParseEvent, Record, RecordData, RowError};

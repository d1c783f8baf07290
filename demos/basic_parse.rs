//! Basic parsing of an in-memory CSV document
//!
//! Run with: cargo run --example basic_parse

use csvstream::{parse, ParseEvent, ParseOptions};

fn main() -> csvstream::Result<()> {
    let input = "\
name,team,score
Alice,Red,\"1,204\"
Bob,Blue,987
# mid-file comment
Carol,Red,1431";

    let options = ParseOptions::new()
        .newline("\n")
        .comment_prefix("#")
        .error_on_comment(false);

    let records = parse(input, options, |event| {
        if let ParseEvent::Error(error) = event {
            eprintln!("line {}: {} - {}", error.index, error.code, error.message);
        }
    })?
    .expect("collection enabled by default");

    for record in &records {
        println!(
            "{} ({}) scored {}",
            record.get("name").unwrap_or("?"),
            record.get("team").unwrap_or("?"),
            record.get("score").unwrap_or("?"),
        );
    }

    println!("\n{} records parsed", records.len());
    Ok(())
}

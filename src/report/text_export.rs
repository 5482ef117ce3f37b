//! Plain-text rendering of a match CSV
//!
//! Each CSV row becomes one line with its fields joined by `", "`. The
//! header row is kept, so the output reads the same as the CSV minus the
//! quoting.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::crawl_engine::CrawlError;

/// Copy CSV rows from `reader` to `writer` as comma-space joined lines.
/// Returns the number of lines written.
pub fn write_text<R: Read, W: Write>(reader: R, writer: W) -> Result<usize, CrawlError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut out = BufWriter::new(writer);

    let mut lines = 0;
    for row in csv_reader.records() {
        let row = row?;
        writeln!(out, "{}", row.iter().collect::<Vec<_>>().join(", "))?;
        lines += 1;
    }
    out.flush()?;
    Ok(lines)
}

/// Convert the CSV file at `input` into a text file at `output`.
pub fn csv_to_text(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize, CrawlError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let lines = write_text(File::open(input)?, File::create(output)?)?;
    log::info!(
        target: "brandcheck::report",
        "Converted {} to {} ({lines} line(s))",
        input.display(),
        output.display()
    );
    Ok(lines)
}

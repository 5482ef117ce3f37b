//! Match records as CSV, one row per record

use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::crawl_engine::CrawlError;
use crate::matcher::MatchRecord;

pub const CSV_HEADER: [&str; 3] = ["URL", "Matched_Text", "Match_Type"];

/// Write the header and one row per record to any writer.
///
/// Records are written in the order given.
pub fn write_matches_csv<W: Write>(writer: W, records: &[MatchRecord]) -> Result<(), CrawlError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record([
            record.source_url.as_str(),
            record.matched_text.as_str(),
            record.match_type_label().as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the match CSV to `path`, creating parent directories as needed.
pub fn save_matches_csv(path: impl AsRef<Path>, records: &[MatchRecord]) -> Result<(), CrawlError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_matches_csv(File::create(path)?, records)?;
    info!(
        target: "brandcheck::report",
        "Wrote {} match(es) to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_fields_with_commas() {
        let records = vec![MatchRecord::detect(
            "https://example.org/",
            "Dana Farber, Boston",
            "Dana Farber",
        )];
        let mut out = Vec::new();
        write_matches_csv(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "URL,Matched_Text,Match_Type\n\
             https://example.org/,\"Dana Farber, Boston\",detect 'Dana Farber'\n"
        );
    }
}

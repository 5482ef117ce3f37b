//! Result sinks: the match CSV, a full JSON report, and a plain-text
//! rendering of a match CSV.

pub mod csv_saver;
pub mod json_saver;
pub mod text_export;

pub use csv_saver::{CSV_HEADER, save_matches_csv, write_matches_csv};
pub use json_saver::save_report_json;
pub use text_export::{csv_to_text, write_text};

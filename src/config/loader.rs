//! Loader for the comma-separated crawl configuration file
//!
//! ```text
//! website, https://www.example.org/
//! official, Dana-Farber, Dana-Farber Cancer Institute
//! detect, Dana Farber, DFCI
//! fuzzy, Dana-Farber
//! regex, dfbcc
//! ```
//!
//! The first row names the start URL. Every following row starts with a
//! kind and lists the values for that kind.

use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::builder::{CrawlConfigBuilder, WithStartUrl};
use super::types::CrawlConfig;
use crate::crawl_engine::CrawlError;
use crate::matcher::StringSets;

/// Label in the first column of a value row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Official,
    Detect,
    Fuzzy,
    Regex,
}

/// A row kind that is not one of the known labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized row kind '{0}'")]
pub struct UnknownRowKind(pub String);

impl FromStr for RowKind {
    type Err = UnknownRowKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "official" => Ok(Self::Official),
            "detect" => Ok(Self::Detect),
            "fuzzy" => Ok(Self::Fuzzy),
            "regex" => Ok(Self::Regex),
            _ => Err(UnknownRowKind(s.trim().to_string())),
        }
    }
}

/// Parsed contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub start_url: String,
    pub official: Vec<String>,
    pub detect: Vec<String>,
    pub fuzzy: Vec<String>,
    pub regex_patterns: Vec<String>,
}

impl ConfigFile {
    /// String sets as loaded, not yet cleaned
    #[must_use]
    pub fn strings(&self) -> StringSets {
        StringSets {
            official: self.official.clone(),
            detect: self.detect.clone(),
            fuzzy: self.fuzzy.clone(),
            regex_patterns: self.regex_patterns.clone(),
        }
    }

    /// Start a builder seeded with this file's start URL and string sets.
    /// Tunables are left at their defaults for the caller to override.
    #[must_use]
    pub fn into_builder(self) -> CrawlConfigBuilder<WithStartUrl> {
        CrawlConfig::builder()
            .start_url(self.start_url)
            .official(self.official)
            .detect(self.detect)
            .fuzzy(self.fuzzy)
            .regex_patterns(self.regex_patterns)
    }

    fn push(&mut self, kind: RowKind, values: impl IntoIterator<Item = String>) {
        let target = match kind {
            RowKind::Official => &mut self.official,
            RowKind::Detect => &mut self.detect,
            RowKind::Fuzzy => &mut self.fuzzy,
            RowKind::Regex => &mut self.regex_patterns,
        };
        target.extend(values);
    }
}

/// Parse configuration rows from any reader.
///
/// # Errors
///
/// `CrawlError::Config` if the first non-blank row is not `website, <url>`;
/// `CrawlError::Csv` if the input is not readable as CSV.
pub fn parse_config<R: Read>(reader: R) -> Result<ConfigFile, CrawlError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = csv_reader
        .records()
        .filter(|row| !matches!(row, Ok(r) if r.iter().all(str::is_empty)));

    let first = rows
        .next()
        .ok_or_else(|| CrawlError::Config("configuration file is empty".to_string()))??;

    let is_website = first
        .get(0)
        .is_some_and(|label| label.eq_ignore_ascii_case("website"));
    let start_url = first.get(1).filter(|url| !url.is_empty());

    let mut config = match (is_website, start_url) {
        (true, Some(url)) => ConfigFile {
            start_url: url.to_string(),
            ..ConfigFile::default()
        },
        _ => {
            return Err(CrawlError::Config(format!(
                "first row must be 'website, <start_url>', found '{}'",
                first.iter().collect::<Vec<_>>().join(", ")
            )));
        }
    };

    for row in rows {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        let Some(label) = row.get(0) else {
            continue;
        };

        let kind = match label.parse::<RowKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(target: "brandcheck::config", "Skipping row {line}: {e}");
                continue;
            }
        };

        let values: Vec<String> = row
            .iter()
            .skip(1)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        debug!(
            target: "brandcheck::config",
            "Row {line}: {} {kind:?} value(s)",
            values.len()
        );
        config.push(kind, values);
    }

    Ok(config)
}

/// Read and parse a configuration file from disk.
///
/// # Errors
///
/// `CrawlError::Io` if the file cannot be opened, otherwise as
/// [`parse_config`].
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ConfigFile, CrawlError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config = parse_config(file)?;
    debug!(
        target: "brandcheck::config",
        "Loaded {} (start URL {})",
        path.display(),
        config.start_url
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_kind_is_case_insensitive() {
        assert_eq!("OFFICIAL".parse::<RowKind>(), Ok(RowKind::Official));
        assert_eq!(" Detect ".parse::<RowKind>(), Ok(RowKind::Detect));
        assert_eq!("fuzzy".parse::<RowKind>(), Ok(RowKind::Fuzzy));
        assert_eq!("Regex".parse::<RowKind>(), Ok(RowKind::Regex));
        assert!("spellcheck".parse::<RowKind>().is_err());
    }

    #[test]
    fn unknown_rows_are_skipped() {
        let input = "website,https://example.org/\nbogus,a,b\ndetect,Dana Farber\n";
        let config = parse_config(input.as_bytes()).expect("valid config");
        assert_eq!(config.detect, vec!["Dana Farber".to_string()]);
        assert!(config.official.is_empty());
    }

    #[test]
    fn wrong_first_row_is_fatal() {
        let err = parse_config("official,Dana-Farber\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CrawlError::Config(_)));
    }
}

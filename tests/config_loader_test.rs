//! Loading the comma-separated configuration file

use kodegen_tools_brandcheck::{CrawlError, load_config_file, parse_config};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
website, https://www.dana-farber.org/
official, Dana-Farber, Dana-Farber Cancer Institute
detect, Dana Farber, DanaFarber
fuzzy, Dana-Farber

regex, dana\\s+farber
spellcheck, ignored
";

#[test]
fn loads_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = load_config_file(file.path()).unwrap();

    assert_eq!(config.start_url, "https://www.dana-farber.org/");
    assert_eq!(config.official, vec!["Dana-Farber", "Dana-Farber Cancer Institute"]);
    assert_eq!(config.detect, vec!["Dana Farber", "DanaFarber"]);
    assert_eq!(config.fuzzy, vec!["Dana-Farber"]);
    assert_eq!(config.regex_patterns, vec!["dana\\s+farber"]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config_file(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, CrawlError::Io(_)));
}

#[test]
fn repeated_rows_accumulate() {
    let input = "website,example.org\ndetect,A\ndetect,B,,\nDETECT , C\n";
    let config = parse_config(input.as_bytes()).unwrap();
    assert_eq!(config.detect, vec!["A", "B", "C"]);
}

#[test]
fn first_row_must_name_the_website() {
    let err = parse_config("official,Acme\nwebsite,https://acme.test/\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CrawlError::Config(_)));

    let err = parse_config("website,\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CrawlError::Config(_)));

    let err = parse_config("".as_bytes()).unwrap_err();
    assert!(matches!(err, CrawlError::Config(_)));
}

#[test]
fn builder_from_file_cleans_and_scopes() {
    let input = "website, acme.test\ndetect, ACME , ACME\nofficial, Acme\n";
    let config = parse_config(input.as_bytes())
        .unwrap()
        .into_builder()
        .build()
        .unwrap();

    assert_eq!(config.start_url(), "https://acme.test/");
    assert_eq!(config.domain(), "acme.test");
    assert_eq!(config.detect(), ["ACME".to_string()]);
    assert_eq!(config.official(), ["Acme".to_string()]);
}

#[test]
fn invalid_regex_in_file_fails_the_build() {
    let input = "website,https://acme.test/\nregex,[unterminated\n";
    let err = parse_config(input.as_bytes())
        .unwrap()
        .into_builder()
        .build()
        .unwrap_err();
    assert!(matches!(err, CrawlError::Config(_)));
}

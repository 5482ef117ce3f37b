//! Match engine behavior: strategy order, official exclusion, fuzzy scoring

mod common;

use common::strings;
use kodegen_tools_brandcheck::matcher::{StringClassifier, StringSets, ratio, scan};
use kodegen_tools_brandcheck::{MatchKind, MatchRecord};
use proptest::prelude::*;

const URL: &str = "https://www.example.org/";

fn classifier(official: &[&str], detect: &[&str], fuzzy: &[&str], regex: &[&str]) -> StringClassifier {
    StringClassifier::from_sets(
        StringSets {
            official: strings(official),
            detect: strings(detect),
            fuzzy: strings(fuzzy),
            regex_patterns: strings(regex),
        },
        true,
    )
    .expect("valid string sets")
}

fn of_kind(records: &[MatchRecord], kind: MatchKind) -> Vec<&MatchRecord> {
    records.iter().filter(|r| r.kind == kind).collect()
}

#[test]
fn detect_flags_known_variant() {
    let c = classifier(&["Dana-Farber"], &["Dana Farber"], &[], &[]);
    let records = scan("Welcome to Dana Farber Cancer Institute", URL, &c, 85.0);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, MatchKind::Detect);
    assert_eq!(records[0].matched_text, "Dana Farber");
    assert_eq!(records[0].trigger, "Dana Farber");
    assert_eq!(records[0].source_url, URL);
}

#[test]
fn detect_keeps_page_casing_and_reports_every_occurrence() {
    let c = classifier(&[], &["dana farber"], &[], &[]);
    let records = scan("DANA FARBER and Dana Farber\nagain dana farber", URL, &c, 85.0);

    let texts: Vec<_> = records.iter().map(|r| r.matched_text.as_str()).collect();
    assert_eq!(texts, vec!["DANA FARBER", "Dana Farber", "dana farber"]);
}

#[test]
fn regex_flags_case_insensitive_match() {
    let c = classifier(&[], &[], &[], &["dfbcc"]);
    let records = scan("DFBCC proudly serves patients", URL, &c, 85.0);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, MatchKind::Regex);
    assert_eq!(records[0].matched_text, "DFBCC");
    assert_eq!(records[0].trigger, "dfbcc");
}

#[test]
fn regex_reports_each_match_separately() {
    let c = classifier(&[], &[], &[], &[r"dana.farber"]);
    let records = scan("Dana Farber, Dana_Farber and Dana/Farber", URL, &c, 85.0);
    assert_eq!(records.len(), 3);
}

#[test]
fn case_sensitive_regex_is_honored() {
    let c = StringClassifier::from_sets(
        StringSets {
            regex_patterns: strings(&["dfbcc"]),
            ..Default::default()
        },
        false,
    )
    .unwrap();
    assert!(scan("DFBCC proudly serves patients", URL, &c, 85.0).is_empty());
}

#[test]
fn fuzzy_catches_near_miss_at_default_threshold() {
    let c = classifier(&[], &[], &["Dana-Farber"], &[]);

    let records = scan("Dana Farber", URL, &c, 85.0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, MatchKind::Fuzzy);
    assert_eq!(records[0].matched_text, "Dana Farber");
    let score = records[0].score.expect("fuzzy records carry a score");
    assert!(score >= 85.0 && score < 100.0, "score was {score}");

    assert!(scan("Dana Farber", URL, &c, 100.0).is_empty());
}

#[test]
fn fuzzy_threshold_is_inclusive() {
    let c = classifier(&[], &[], &["abcd"], &[]);
    // LCS("abce", "abcd") = 3, ratio = 75
    let score = ratio("abce", "abcd");
    assert!((score - 75.0).abs() < 1e-9);
    assert_eq!(scan("abce", URL, &c, 75.0).len(), 1);
    assert!(scan("abce", URL, &c, 75.1).is_empty());
}

#[test]
fn fuzzy_skips_lines_containing_official_string() {
    let c = classifier(&["Dana-Farber"], &[], &["Dana-Farber"], &[]);
    for threshold in [0.0, 50.0, 85.0, 100.0] {
        let records = scan("Dana-Farber Cancer Institute", URL, &c, threshold);
        assert!(of_kind(&records, MatchKind::Fuzzy).is_empty());
    }
}

#[test]
fn fuzzy_reports_trimmed_line() {
    let c = classifier(&[], &[], &["Dana-Farber"], &[]);
    let records = scan("   Dana Farber  \n", URL, &c, 85.0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].matched_text, "Dana Farber");
}

#[test]
fn one_line_can_match_several_references() {
    let c = classifier(&[], &[], &["Dana-Farber", "Dana Farbor"], &[]);
    let records = scan("Dana Farber", URL, &c, 85.0);
    let triggers: Vec<_> = records.iter().map(|r| r.trigger.as_str()).collect();
    assert_eq!(triggers, vec!["Dana-Farber", "Dana Farbor"]);
}

#[test]
fn blank_lines_never_match() {
    let c = classifier(&[], &[], &["Dana-Farber"], &[]);
    assert!(scan("\n   \n\t\n", URL, &c, 0.0).is_empty());
}

#[test]
fn empty_page_yields_nothing() {
    let c = classifier(&["Dana-Farber"], &["Dana Farber"], &["Dana-Farber"], &["dana"]);
    assert!(scan("", URL, &c, 0.0).is_empty());
}

#[test]
fn strategies_run_in_fixed_order() {
    let c = classifier(&[], &["Dana Farber"], &["Dana-Farber"], &["dfci"]);
    let records = scan("DFCI\nDana Farber", URL, &c, 85.0);
    let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![MatchKind::Regex, MatchKind::Detect, MatchKind::Fuzzy]);
}

#[test]
fn official_strings_are_never_reported() {
    let c = classifier(
        &["Dana-Farber"],
        &["Dana-Farber", "Dana Farber"],
        &["Dana-Farber"],
        &[r"dana.farber"],
    );
    let page = "Dana-Farber\nDana Farber\nVisit Dana-Farber today";
    let records = scan(page, URL, &c, 50.0);

    // Detect variant equal to an official string is never searched, and
    // regex matches equal to one are dropped
    assert!(
        records
            .iter()
            .filter(|r| r.kind != MatchKind::Fuzzy)
            .all(|r| r.matched_text != "Dana-Farber")
    );
    assert!(records.iter().all(|r| r.kind != MatchKind::Detect || r.trigger != "Dana-Farber"));
    // Lines containing the official string are skipped for fuzzy
    assert!(
        of_kind(&records, MatchKind::Fuzzy)
            .iter()
            .all(|r| !r.matched_text.to_lowercase().contains("dana-farber"))
    );
    assert_eq!(of_kind(&records, MatchKind::Detect).len(), 1);
    assert_eq!(of_kind(&records, MatchKind::Regex).len(), 1);
}

#[test]
fn official_exclusion_for_regex_is_case_sensitive() {
    let c = classifier(&["Dana-Farber"], &[], &[], &[r"dana.farber"]);
    let records = scan("DANA-FARBER", URL, &c, 85.0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].matched_text, "DANA-FARBER");
}

#[test]
fn match_type_labels() {
    let c = classifier(&[], &["Dana Farber"], &["Dana-Farber"], &["dfbcc"]);
    let records = scan("dfbcc\nDana Farber", URL, &c, 85.0);
    let labels: Vec<_> = records.iter().map(MatchRecord::match_type_label).collect();
    assert_eq!(
        labels,
        vec![
            "regex 'dfbcc'".to_string(),
            "detect 'Dana Farber'".to_string(),
            "fuzzy 'Dana-Farber' (90.9)".to_string(),
        ]
    );
}

proptest! {
    #[test]
    fn raising_threshold_never_adds_fuzzy_matches(
        lines in proptest::collection::vec("[a-d -]{0,12}", 0..8),
        references in proptest::collection::vec("[a-d-]{1,8}", 1..4),
        low in 0.0f64..=100.0,
        delta in 0.0f64..=100.0,
    ) {
        let refs: Vec<&str> = references.iter().map(String::as_str).collect();
        let c = classifier(&[], &[], &refs, &[]);
        let page = lines.join("\n");
        let high = (low + delta).min(100.0);

        let at_low = scan(&page, URL, &c, low).len();
        let at_high = scan(&page, URL, &c, high).len();
        prop_assert!(at_high <= at_low);
    }

    #[test]
    fn ratio_is_bounded_and_symmetric(a in "[a-z -]{0,16}", b in "[a-z -]{0,16}") {
        let ab = ratio(&a, &b);
        prop_assert!((0.0..=100.0).contains(&ab));
        prop_assert!((ab - ratio(&b, &a)).abs() < 1e-9);
    }
}

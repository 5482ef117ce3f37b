//! Result sink: CSV, JSON and plain-text output

use kodegen_tools_brandcheck::report::CSV_HEADER;
use kodegen_tools_brandcheck::{
    CrawlReport, MatchKind, MatchRecord, StopReason, csv_to_text, save_matches_csv,
    save_report_json,
};
use std::time::Duration;

fn records() -> Vec<MatchRecord> {
    vec![
        MatchRecord::regex("https://acme.test/", "acme, inc", "acme,? inc"),
        MatchRecord::detect("https://acme.test/about", "ACME", "ACME"),
        MatchRecord::fuzzy("https://acme.test/about", "Acme Incc", "Acme Inc", 94.1),
    ]
}

#[test]
fn csv_file_has_header_and_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("matches.csv");

    save_matches_csv(&path, &records()).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(header, CSV_HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "acme, inc");
    assert_eq!(&rows[0][2], "regex 'acme,? inc'");
    assert_eq!(&rows[1][0], "https://acme.test/about");
    assert_eq!(&rows[2][2], "fuzzy 'Acme Inc' (94.1)");
}

#[test]
fn empty_result_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.csv");

    save_matches_csv(&path, &[]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), "URL,Matched_Text,Match_Type");
}

#[test]
fn text_export_joins_fields() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("matches.csv");
    let txt_path = dir.path().join("matches.txt");
    save_matches_csv(&csv_path, &records()[1..2]).unwrap();

    let lines = csv_to_text(&csv_path, &txt_path).unwrap();

    assert_eq!(lines, 2);
    let text = std::fs::read_to_string(&txt_path).unwrap();
    assert_eq!(
        text,
        "URL, Matched_Text, Match_Type\nhttps://acme.test/about, ACME, detect 'ACME'\n"
    );
}

#[tokio::test]
async fn json_report_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = CrawlReport {
        start_url: "https://acme.test/".into(),
        domain: "acme.test".into(),
        records: records(),
        visited_urls: vec!["https://acme.test/".into(), "https://acme.test/about".into()],
        pages_visited: 2,
        pages_skipped: 0,
        stop_reason: StopReason::TimeBudget,
        duration: Duration::from_millis(1500),
    };

    save_report_json(report, &path).await.unwrap();

    let loaded: CrawlReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.stop_reason, StopReason::TimeBudget);
    assert_eq!(loaded.records, records());
    assert_eq!(loaded.count_of(MatchKind::Fuzzy), 1);
    assert_eq!(loaded.visited_urls.len(), 2);
}

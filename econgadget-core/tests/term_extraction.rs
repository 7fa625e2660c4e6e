//! Term extraction against a frozen copy of the office-holder list page.

use econgadget_core::terms::{extract_terms, ExtractOptions, SkipReason};
use econgadget_core::TermRecord;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn extracts_rows_in_page_order() {
    let page = fixture("presidents.html");
    let extraction = extract_terms(&page, 2025, &ExtractOptions::default());

    assert_eq!(extraction.tables_used, 1, "infobox has too few rows");
    let names: Vec<&str> = extraction.records.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Ronald Reagan",
            "George H. W. Bush",
            "Bill Clinton",
            "George W. Bush",
            "Barack Obama",
            "Donald Trump",
            "Joe Biden",
            "Donald Trump",
        ]
    );
    assert_eq!(extraction.records[4], TermRecord::new("Barack Obama", 2009, 2017));
    // Incumbent has only a start token.
    assert_eq!(extraction.records[7], TermRecord::new("Donald Trump", 2025, 2025));
}

#[test]
fn bad_rows_are_skipped_with_reasons() {
    let page = fixture("presidents.html");
    let extraction = extract_terms(&page, 2025, &ExtractOptions::default());

    let reasons: Vec<&SkipReason> = extraction.skipped.iter().map(|s| &s.reason).collect();
    assert_eq!(reasons.len(), 3);
    assert!(matches!(reasons[0], SkipReason::TooFewCells { found: 1, .. }));
    assert_eq!(
        reasons[1],
        &SkipReason::SanityRejected {
            start: 1841,
            end: 2025,
            max: 20
        }
    );
    assert_eq!(
        reasons[2],
        &SkipReason::MalformedDateToken("unknown".to_string())
    );
    assert!(extraction.skipped.iter().all(|s| s.table == 1));
}

#[test]
fn recent_terms_from_page() {
    let page = fixture("presidents.html");
    let recent = extract_terms(&page, 2025, &ExtractOptions::default()).recent(2025, 10);
    let names: Vec<&str> = recent.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Barack Obama", "Donald Trump", "Joe Biden", "Donald Trump"]
    );
}

#[test]
fn class_filter_excludes_other_tables() {
    let page = fixture("presidents.html");
    let opts = ExtractOptions {
        table_class: Some("navbox".to_string()),
        ..ExtractOptions::default()
    };
    let extraction = extract_terms(&page, 2025, &opts);
    assert_eq!(extraction.tables_used, 0);
    assert!(extraction.records.is_empty());

    let opts = ExtractOptions {
        table_class: Some("wikitable".to_string()),
        ..ExtractOptions::default()
    };
    assert_eq!(extract_terms(&page, 2025, &opts).records.len(), 8);
}

#[test]
fn extraction_is_repeatable() {
    let page = fixture("presidents.html");
    let first = extract_terms(&page, 2025, &ExtractOptions::default());
    let second = extract_terms(&page, 2025, &ExtractOptions::default());
    assert_eq!(first, second);
}

#[test]
fn garbage_page_yields_nothing() {
    let extraction = extract_terms("<p>not a table</p><table>", 2025, &ExtractOptions::default());
    assert!(extraction.records.is_empty());
    assert_eq!(extraction.tables_used, 0);
}

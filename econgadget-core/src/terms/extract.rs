//! Term extraction from the encyclopedia's list-of-office-holders tables.
//!
//! Every row yields either a `TermRecord` or a `SkipReason`. A bad row never
//! aborts the page; the skipped rows are returned next to the records so the
//! caller can log them and tests can assert on them.

use super::html::{self, Element};
use crate::domain::TermRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset of the date inside a sortable token such as `000000002017-01-20-0000`.
pub const DATE_TOKEN_OFFSET: usize = 8;

/// Only the year (first four characters of the date) is read.
pub const YEAR_WIDTH: usize = 4;

/// Knobs for the table heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Tables with fewer rows than this (header included) are ignored.
    pub min_rows: usize,
    /// Rows with fewer cells than this are ignored.
    pub min_cells: usize,
    /// Zero-based index of the term-date cell.
    pub term_cell: usize,
    /// Terms spanning more years than this are rejected as mis-parsed.
    pub max_term_years: i32,
    /// Leading phrase stripped from link titles (case-insensitive).
    pub office_phrase: String,
    /// Restrict to tables carrying this class, e.g. `wikitable`.
    pub table_class: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_rows: 10,
            min_cells: 4,
            term_cell: 3,
            max_term_years: 20,
            office_phrase: "presidency of".to_string(),
            table_class: None,
        }
    }
}

/// Why a row produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("row has {found} cells, need at least {needed}")]
    TooFewCells { found: usize, needed: usize },

    #[error("first cell has no link")]
    MissingLink,

    #[error("link has neither a usable title nor text")]
    EmptyName,

    #[error("term cell has no sortable date token")]
    MissingStartDate,

    #[error("malformed date token '{0}'")]
    MalformedDateToken(String),

    #[error("term ends ({end}) before it starts ({start})")]
    InvertedRange { start: i32, end: i32 },

    #[error("implausible term {start}-{end} (over {max} years)")]
    SanityRejected { start: i32, end: i32, max: i32 },
}

/// A row that was skipped, located by table and row index (header is row 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub table: usize,
    pub row: usize,
    pub reason: SkipReason,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<TermRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Tables that passed the size and class filters.
    pub tables_used: usize,
}

impl Extraction {
    /// Records whose term ended within the last `years` years.
    pub fn recent(&self, current_year: i32, years: i32) -> Vec<TermRecord> {
        recent_terms(&self.records, current_year, years)
    }
}

/// Parse every qualifying table of `page` into term records.
///
/// `current_year` closes terms that only carry a start date.
pub fn extract_terms(page: &str, current_year: i32, opts: &ExtractOptions) -> Extraction {
    let mut out = Extraction::default();

    for (t_idx, table) in html::elements(page, &["table"]).iter().enumerate() {
        if let Some(class) = &opts.table_class {
            if !html::has_class(table.open_tag(page), class) {
                continue;
            }
        }

        let body = table.inner(page);
        let rows = html::elements(body, &["tr"]);
        if rows.len() < opts.min_rows {
            continue;
        }
        out.tables_used += 1;

        for (r_idx, row) in rows.iter().enumerate().skip(1) {
            let row_html = row.inner(body);
            let cells: Vec<&str> = html::elements(row_html, &["th", "td"])
                .iter()
                .map(|c| c.outer(row_html))
                .collect();

            match extract_row(&cells, current_year, opts) {
                Ok(record) => out.records.push(record),
                Err(reason) => out.skipped.push(SkippedRow {
                    table: t_idx,
                    row: r_idx,
                    reason,
                }),
            }
        }
    }

    out
}

/// Turn one row's cells (each the full `<td>`/`<th>` element) into a record.
pub fn extract_row(
    cells: &[&str],
    current_year: i32,
    opts: &ExtractOptions,
) -> Result<TermRecord, SkipReason> {
    let needed = opts.min_cells.max(opts.term_cell + 1);
    if cells.len() < needed {
        return Err(SkipReason::TooFewCells {
            found: cells.len(),
            needed,
        });
    }

    let name = display_name(cells[0], &opts.office_phrase)?;

    let tokens: Vec<String> = html::open_tags(cells[opts.term_cell], "span")
        .into_iter()
        .filter_map(|tag| html::attr(tag, "data-sort-value"))
        .collect();

    let start_year = match tokens.first() {
        Some(token) => year_from_sort_token(token)?,
        None => return Err(SkipReason::MissingStartDate),
    };
    let end_year = match tokens.get(1) {
        Some(token) => year_from_sort_token(token)?,
        None => current_year,
    };

    if end_year < start_year {
        return Err(SkipReason::InvertedRange {
            start: start_year,
            end: end_year,
        });
    }
    if end_year - start_year > opts.max_term_years {
        return Err(SkipReason::SanityRejected {
            start: start_year,
            end: end_year,
            max: opts.max_term_years,
        });
    }

    Ok(TermRecord::new(name, start_year, end_year))
}

/// Name from the first link in a cell.
///
/// A title like "Presidency of Barack Obama" yields "Barack Obama". Titles
/// without the phrase fall back to the link text.
pub fn display_name(cell: &str, office_phrase: &str) -> Result<String, SkipReason> {
    let link: Element = html::next_element(cell, "a", 0).ok_or(SkipReason::MissingLink)?;

    if let Some(title) = html::attr(link.open_tag(cell), "title") {
        if let Some(name) = strip_office_phrase(&title, office_phrase) {
            return Ok(name);
        }
    }

    let text = html::text_content(link.inner(cell));
    if text.is_empty() {
        Err(SkipReason::EmptyName)
    } else {
        Ok(text)
    }
}

/// Everything after the first case-insensitive occurrence of `phrase`, or
/// `None` if the phrase is absent or nothing follows it.
pub fn strip_office_phrase(title: &str, phrase: &str) -> Option<String> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    let at = title
        .to_ascii_lowercase()
        .find(&phrase.to_ascii_lowercase())?;
    let rest = html::normalize_ws(title.get(at + phrase.len()..)?);
    (!rest.is_empty()).then_some(rest)
}

/// Year from a sortable date token: the four characters at offset 8.
///
/// This is a positional slice, not date parsing. `000000002017-01-20-0000`
/// gives 2017.
pub fn year_from_sort_token(token: &str) -> Result<i32, SkipReason> {
    token
        .get(DATE_TOKEN_OFFSET..DATE_TOKEN_OFFSET + YEAR_WIDTH)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or_else(|| SkipReason::MalformedDateToken(token.to_string()))
}

/// Records whose `end_year >= current_year - years`, in input order.
pub fn recent_terms(records: &[TermRecord], current_year: i32, years: i32) -> Vec<TermRecord> {
    records
        .iter()
        .filter(|t| t.is_recent(current_year, years))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_link(title: &str, text: &str) -> String {
        format!(r#"<th><a href="/wiki/x" title="{title}">{text}</a></th>"#)
    }

    fn term_cell(tokens: &[&str]) -> String {
        let spans: String = tokens
            .iter()
            .map(|t| format!(r#"<span data-sort-value="{t}">date</span> – "#))
            .collect();
        format!("<td>{spans}</td>")
    }

    fn row(name_cell: &str, term: &str) -> Vec<String> {
        vec![
            name_cell.to_string(),
            "<td>portrait</td>".to_string(),
            "<td>name</td>".to_string(),
            term.to_string(),
        ]
    }

    fn run(cells: &[String], year: i32) -> Result<TermRecord, SkipReason> {
        let refs: Vec<&str> = cells.iter().map(|s| s.as_str()).collect();
        extract_row(&refs, year, &ExtractOptions::default())
    }

    #[test]
    fn ongoing_term_ends_in_current_year() {
        let cells = row(
            &cell_link("Presidency of Joe Biden", "46"),
            &term_cell(&["000000002017-01-20-0000"]),
        );
        assert_eq!(
            run(&cells, 2024),
            Ok(TermRecord::new("Joe Biden", 2017, 2024))
        );
    }

    #[test]
    fn closed_term_reads_both_tokens() {
        let cells = row(
            &cell_link("Presidency of Barack Obama", "44"),
            &term_cell(&["000000002009-01-20-0000", "000000002017-01-20-0000"]),
        );
        assert_eq!(
            run(&cells, 2024),
            Ok(TermRecord::new("Barack Obama", 2009, 2017))
        );
    }

    #[test]
    fn title_without_phrase_uses_link_text() {
        let cells = row(
            &cell_link("Barack Obama", "Barack&nbsp;Obama"),
            &term_cell(&["000000002009-01-20-0000", "000000002017-01-20-0000"]),
        );
        assert_eq!(run(&cells, 2024).unwrap().name, "Barack Obama");
    }

    #[test]
    fn phrase_match_is_case_insensitive() {
        assert_eq!(
            strip_office_phrase("First presidency of Grover Cleveland", "presidency of"),
            Some("Grover Cleveland".to_string())
        );
        assert_eq!(
            strip_office_phrase("PRESIDENCY OF X", "presidency of"),
            Some("X".to_string())
        );
        assert_eq!(strip_office_phrase("Presidency of ", "presidency of"), None);
        assert_eq!(strip_office_phrase("John Adams", "presidency of"), None);
    }

    #[test]
    fn span_over_threshold_is_rejected() {
        let cells = row(
            &cell_link("Presidency of X", "1"),
            &term_cell(&["000000001841-03-04-0000", "000000002025-01-20-0000"]),
        );
        assert_eq!(
            run(&cells, 2025),
            Err(SkipReason::SanityRejected {
                start: 1841,
                end: 2025,
                max: 20
            })
        );
    }

    #[test]
    fn span_at_threshold_is_accepted() {
        let cells = row(
            &cell_link("Presidency of X", "1"),
            &term_cell(&["000000001933-03-04-0000", "000000001953-01-20-0000"]),
        );
        assert!(run(&cells, 2025).is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let cells = row(
            &cell_link("Presidency of X", "1"),
            &term_cell(&["000000002020-01-01-0000", "000000002010-01-01-0000"]),
        );
        assert!(matches!(
            run(&cells, 2025),
            Err(SkipReason::InvertedRange { .. })
        ));
    }

    #[test]
    fn row_failures_are_reported() {
        let short = vec!["<td>a</td>".to_string(); 3];
        assert_eq!(
            run(&short, 2024),
            Err(SkipReason::TooFewCells { found: 3, needed: 4 })
        );

        let no_link = row("<th>44</th>", &term_cell(&["000000002009-01-20-0000"]));
        assert_eq!(run(&no_link, 2024), Err(SkipReason::MissingLink));

        let no_dates = row(&cell_link("Presidency of X", "1"), "<td>unknown</td>");
        assert_eq!(run(&no_dates, 2024), Err(SkipReason::MissingStartDate));

        let empty_name = row(
            r#"<th><a href="/wiki/x"><img src="p.png"></a></th>"#,
            &term_cell(&["000000002009-01-20-0000"]),
        );
        assert_eq!(run(&empty_name, 2024), Err(SkipReason::EmptyName));
    }

    #[test]
    fn year_slice_is_positional() {
        assert_eq!(year_from_sort_token("000000002017-01-20-0000"), Ok(2017));
        assert_eq!(year_from_sort_token("000000002017"), Ok(2017));
        // The ISO form puts the year at offset 0, which the slice does not read.
        assert!(year_from_sort_token("2017-01-20").is_err());
        assert!(year_from_sort_token("00000000abcd-01-01").is_err());
        assert!(year_from_sort_token("").is_err());
    }

    #[test]
    fn recent_filter_keeps_order() {
        let terms = vec![
            TermRecord::new("A", 2001, 2009),
            TermRecord::new("B", 2009, 2017),
            TermRecord::new("C", 2017, 2021),
        ];
        let recent = recent_terms(&terms, 2024, 10);
        let names: Vec<&str> = recent.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }
}

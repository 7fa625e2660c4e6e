//! End-to-end pipeline against fixture collaborators.

use chrono::NaiveDate;
use econgadget_core::data::{
    DataError, PayloadCache, PayloadSource, SeriesProvider, SeriesRequest,
};
use econgadget_core::overlay::{color_for, MarkStyle};
use econgadget_core::terms::TermSource;
use econgadget_core::{AppConfig, Dataset, Pipeline};
use std::path::PathBuf;
use std::sync::Mutex;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

struct PageSource(Result<String, ()>);

impl TermSource for PageSource {
    fn name(&self) -> &str {
        "fixture page"
    }

    fn fetch_page(&self) -> Result<String, DataError> {
        self.0
            .clone()
            .map_err(|_| DataError::NetworkUnreachable("offline".into()))
    }
}

/// Serves one body and records every request it receives.
struct RecordingProvider {
    body: Result<String, ()>,
    requests: Mutex<Vec<SeriesRequest>>,
}

impl RecordingProvider {
    fn serving(body: String) -> Self {
        Self {
            body: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn timing_out() -> Self {
        Self {
            body: Err(()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl SeriesProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn fetch_raw(&self, request: &SeriesRequest) -> Result<String, DataError> {
        self.requests.lock().unwrap().push(request.clone());
        self.body.clone().map_err(|_| DataError::Timeout {
            url: "https://stats.invalid".into(),
            secs: 10,
        })
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    cache: PayloadCache,
    config: AppConfig,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        cache_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };
    let cache = PayloadCache::new(dir.path());
    Harness {
        _dir: dir,
        cache,
        config,
    }
}

#[test]
fn request_covers_trailing_years() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let loaded = pipeline
        .load_dataset(Dataset::Unemployment, today(), false)
        .unwrap();
    assert_eq!(loaded.source, PayloadSource::Network);

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].series_ids, vec!["LNU04000000"]);
    assert_eq!((requests[0].start_year, requests[0].end_year), (2015, 2025));
    assert!(loaded.path.ends_with("LNU04000000_2015_2025.json"));
}

#[test]
fn normalizes_fixture_payload() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let n = pipeline
        .load_dataset(Dataset::Unemployment, today(), false)
        .unwrap()
        .normalized;

    // 125 monthly points, one of them "-"; ten annual averages.
    assert_eq!(n.observations.len(), 124);
    assert_eq!(n.skipped.len(), 11);
    assert!(n.observations.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(
        n.observations.first().map(|o| o.date),
        NaiveDate::from_ymd_opt(2015, 1, 1)
    );
    assert!(n.observations[..5].iter().all(|o| o.avg_6.is_none()));
    assert!(n.observations[5].avg_6.is_some());
    assert!(n.observations[10].avg_12.is_none());
    assert!(n.observations[11].avg_12.is_some());
}

#[test]
fn second_load_reads_cache_verbatim() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let first = pipeline
        .load_dataset(Dataset::Unemployment, today(), false)
        .unwrap();
    let on_disk = std::fs::read(&first.path).unwrap();
    let second = pipeline
        .load_dataset(Dataset::Unemployment, today(), false)
        .unwrap();

    assert_eq!(second.source, PayloadSource::Cache);
    assert_eq!(provider.calls(), 1);
    assert_eq!(on_disk, fixture("unemployment.json").into_bytes());
    assert_eq!(first.normalized, second.normalized);

    let forced = pipeline
        .load_dataset(Dataset::Unemployment, today(), true)
        .unwrap();
    assert_eq!(forced.source, PayloadSource::Network);
    assert_eq!(provider.calls(), 2);
}

#[test]
fn config_force_refresh_bypasses_cache() {
    let mut h = harness();
    h.config.force_refresh = true;
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    for _ in 0..2 {
        pipeline
            .load_dataset(Dataset::Unemployment, today(), false)
            .unwrap();
    }
    assert_eq!(provider.calls(), 2);
}

#[test]
fn chart_overlays_recent_terms() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let outcome = pipeline
        .chart(Dataset::Unemployment, today(), false)
        .unwrap();
    let chart = &outcome.chart;

    assert!(outcome.terms_warning.is_none());
    assert_eq!(outcome.skipped_points, 11);
    assert_eq!(
        chart.title,
        "Unemployment Rate & Presidential Terms (Last 10 Years)"
    );
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

    // The window is exactly ten years back from today; January through
    // June 2015 are fetched but not shown.
    assert_eq!((chart.window.start, chart.window.end), (d(2015, 6, 15), today()));
    assert_eq!(chart.observations.len(), 118);
    assert_eq!(chart.observations[0].date, d(2015, 7, 1));
    assert!(chart.observations[0].avg_6.is_some());
    let spans: Vec<(&str, NaiveDate, NaiveDate)> = chart
        .overlays
        .iter()
        .map(|o| (o.term.name.as_str(), o.start, o.end))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("Barack Obama", d(2015, 6, 15), d(2017, 12, 31)),
            ("Donald Trump", d(2017, 1, 1), d(2021, 12, 31)),
            ("Joe Biden", d(2021, 1, 1), d(2025, 12, 31).min(today())),
            ("Donald Trump", d(2025, 1, 1), today()),
        ]
    );

    let labels: Vec<&str> = chart.legend.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Actual",
            "6-Mo Avg",
            "12-Mo Avg",
            "Barack Obama",
            "Donald Trump",
            "Joe Biden"
        ]
    );
    assert_eq!(
        chart.legend.get("Donald Trump"),
        Some(&MarkStyle::Shade {
            color: color_for(1),
            alpha: 0.2
        })
    );

    let summary = &chart.summaries[0];
    assert_eq!(summary.count, 118);
    assert_eq!(summary.last, d(2025, 5, 1));
    assert!((summary.latest - 3.4).abs() < 1e-9);
    let avg_6 = summary.latest_avg_6.unwrap();
    assert!((avg_6 - 3.55).abs() < 1e-9, "avg_6 = {avg_6}");
}

#[test]
fn term_failure_degrades_to_no_overlays() {
    let h = harness();
    let page = PageSource(Err(()));
    let provider = RecordingProvider::serving(fixture("unemployment.json"));
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    assert!(pipeline.recent_terms(today()).is_err());
    let outcome = pipeline
        .chart(Dataset::Unemployment, today(), false)
        .unwrap();
    assert!(outcome.chart.overlays.is_empty());
    assert_eq!(outcome.chart.legend.len(), 3);
    assert!(outcome.terms_warning.unwrap().contains("offline"));
}

#[test]
fn series_failure_aborts_and_caches_nothing() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let provider = RecordingProvider::timing_out();
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let err = pipeline
        .chart(Dataset::Unemployment, today(), false)
        .unwrap_err();
    assert!(matches!(err, DataError::Timeout { secs: 10, .. }));
    assert!(err.is_network());
    assert!(h.cache.entries().unwrap().is_empty());

    // No failure state is remembered.
    let _ = pipeline.load_dataset(Dataset::Unemployment, today(), false);
    assert_eq!(provider.calls(), 2);
}

#[test]
fn cpi_dataset_uses_one_set_file() {
    let h = harness();
    let page = PageSource(Ok(fixture("presidents.html")));
    let body = r#"{"status":"REQUEST_SUCCEEDED","message":[],"Results":{"series":[
        {"seriesID":"CUUR0000SA0","data":[{"year":"2025","period":"M01","value":"317.7","footnotes":[{}]}]},
        {"seriesID":"CUUR0000SAF11","data":[{"year":"2025","period":"M01","value":"339.1","footnotes":[{}]}]}
    ]}}"#;
    let provider = RecordingProvider::serving(body.to_string());
    let pipeline = Pipeline::new(&page, &provider, &h.cache, &h.config);

    let outcome = pipeline.chart(Dataset::Cpi, today(), false).unwrap();
    assert_eq!(provider.requests.lock().unwrap()[0].series_ids.len(), 7);
    assert_eq!(outcome.chart.lines.len(), 2);
    assert_eq!(outcome.chart.lines[1].label, "Food (Actual)");
    assert_eq!(outcome.chart.y_label, "Index Value");

    let entries = h.cache.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].file_name.starts_with("set-"));
}

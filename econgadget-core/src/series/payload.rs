//! Statistics API response shape.
//!
//! Data points are kept as raw JSON values so a single malformed point can be
//! skipped without failing the whole payload.

use crate::data::provider::DataError;
use serde::Deserialize;
use std::borrow::Cow;

/// Status string the API uses for a successful request.
pub const REQUEST_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Vec<String>,
    #[serde(rename = "Results", alias = "results", default)]
    pub results: Option<ApiResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResults {
    #[serde(default)]
    pub series: Vec<ApiSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSeries {
    #[serde(rename = "seriesID", alias = "seriesId", alias = "series_id")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

/// One data point as the API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDataPoint {
    pub year: Scalar,
    pub period: String,
    pub value: Scalar,
}

/// The API sends numbers as strings; fixtures sometimes don't.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s.trim()),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

/// Parse a response body and check that it is a usable payload.
///
/// A body is usable when it is JSON of the expected shape, carries a
/// `Results` object, and its `status` (if present) reports success.
pub fn parse_payload(body: &str) -> Result<ApiResponse, DataError> {
    let resp: ApiResponse = serde_json::from_str(body)
        .map_err(|e| DataError::InvalidResponse(format!("malformed payload JSON: {e}")))?;

    if let Some(status) = &resp.status {
        if status != REQUEST_SUCCEEDED {
            return Err(DataError::ApiRejected {
                status: status.clone(),
                messages: resp.message.clone(),
            });
        }
    }
    if resp.results.is_none() {
        return Err(DataError::InvalidResponse("payload has no Results".into()));
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_results_spellings() {
        let upper = r#"{"status":"REQUEST_SUCCEEDED","Results":{"series":[]}}"#;
        let lower = r#"{"results":{"series":[{"seriesID":"X","data":[]}]}}"#;
        assert!(parse_payload(upper).is_ok());
        assert_eq!(parse_payload(lower).unwrap().results.unwrap().series.len(), 1);
    }

    #[test]
    fn rejected_status_is_an_error() {
        let body = r#"{"status":"REQUEST_NOT_PROCESSED","message":["daily threshold reached"],"Results":{}}"#;
        match parse_payload(body) {
            Err(DataError::ApiRejected { status, messages }) => {
                assert_eq!(status, "REQUEST_NOT_PROCESSED");
                assert_eq!(messages, vec!["daily threshold reached"]);
            }
            other => panic!("expected ApiRejected, got {other:?}"),
        }
    }

    #[test]
    fn garbage_and_missing_results_are_invalid() {
        assert!(matches!(
            parse_payload("<html>oops</html>"),
            Err(DataError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_payload(r#"{"status":"REQUEST_SUCCEEDED"}"#),
            Err(DataError::InvalidResponse(_))
        ));
    }

    #[test]
    fn scalars_read_as_text() {
        let p: ApiDataPoint = serde_json::from_str(
            r#"{"year":2024,"period":"M01","value":" 3.7 ","footnotes":[{"code":"P","text":"preliminary"}]}"#,
        )
        .unwrap();
        assert_eq!(p.year.as_text(), "2024");
        assert_eq!(p.value.as_text(), "3.7");
    }
}

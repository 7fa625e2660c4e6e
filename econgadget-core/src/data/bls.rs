//! Statistics API provider (BLS public API v2).
//!
//! One POST per request with a JSON body listing the series ids, the year
//! range and the registration key. No retries: a failure is returned to the
//! caller and the user re-invokes the action.

use super::http;
use super::provider::{DataError, SeriesProvider, SeriesRequest};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Request body expected by the API.
#[derive(Debug, Serialize, PartialEq)]
pub struct ApiRequestBody<'a> {
    pub seriesid: &'a [String],
    pub startyear: String,
    pub endyear: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrationkey: Option<&'a str>,
}

impl<'a> ApiRequestBody<'a> {
    pub fn new(request: &'a SeriesRequest, api_key: Option<&'a str>) -> Self {
        Self {
            seriesid: &request.series_ids,
            startyear: format!("{:04}", request.start_year),
            endyear: format!("{:04}", request.end_year),
            registrationkey: api_key,
        }
    }
}

/// Statistics API provider.
pub struct BlsProvider {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl BlsProvider {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: http::build_client(timeout)?,
            api_url: api_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
        })
    }
}

impl SeriesProvider for BlsProvider {
    fn name(&self) -> &str {
        "bls_api_v2"
    }

    fn fetch_raw(&self, request: &SeriesRequest) -> Result<String, DataError> {
        let body = ApiRequestBody::new(request, self.api_key.as_deref());
        log::info!(
            "requesting {} series for {}-{} from {}",
            request.series_ids.len(),
            request.start_year,
            request.end_year,
            self.api_url
        );

        let resp = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .map_err(|e| http::classify(e, &self.api_url, self.timeout))?;
        let resp = http::check_status(resp, &self.api_url)?;

        resp.text().map_err(|e| {
            if e.is_timeout() {
                http::classify(e, &self.api_url, self.timeout)
            } else {
                DataError::InvalidResponse(format!("unreadable response body: {e}"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let req = SeriesRequest::new(vec!["LNU04000000".into()], 2014, 2024);
        let json = serde_json::to_value(ApiRequestBody::new(&req, Some("k"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "seriesid": ["LNU04000000"],
                "startyear": "2014",
                "endyear": "2024",
                "registrationkey": "k"
            })
        );
    }

    #[test]
    fn key_is_omitted_when_absent() {
        let req = SeriesRequest::new(vec!["CUUR0000SA0".into()], 2014, 2024);
        let json = serde_json::to_value(ApiRequestBody::new(&req, None)).unwrap();
        assert!(json.get("registrationkey").is_none());
    }

    #[test]
    fn blank_key_is_dropped() {
        let p = BlsProvider::new(DEFAULT_API_URL, Some("  ".into()), http::DEFAULT_TIMEOUT)
            .unwrap();
        assert!(p.api_key.is_none());
    }
}

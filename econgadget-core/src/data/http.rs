//! Shared blocking HTTP plumbing: client construction and error mapping.

use super::provider::DataError;
use std::time::Duration;

/// Per-request timeout applied at the HTTP boundary.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("econgadget/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, DataError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))
}

/// Map a transport error onto the timeout / network split.
pub fn classify(err: reqwest::Error, url: &str, timeout: Duration) -> DataError {
    if err.is_timeout() {
        DataError::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs(),
        }
    } else {
        DataError::NetworkUnreachable(err.to_string())
    }
}

/// Reject non-2xx responses.
pub fn check_status(
    resp: reqwest::blocking::Response,
    url: &str,
) -> Result<reqwest::blocking::Response, DataError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(DataError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

//! Where the term page comes from.

use crate::data::http;
use crate::data::provider::DataError;
use std::time::Duration;

/// Default page listing office-holders and their terms.
pub const DEFAULT_TERMS_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_presidents_of_the_United_States";

/// Source of the raw term page markup.
///
/// The page is fetched live on every call; it is never cached.
pub trait TermSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the page body.
    fn fetch_page(&self) -> Result<String, DataError>;
}

/// Fetches the term page with a blocking GET.
pub struct HttpTermSource {
    client: reqwest::blocking::Client,
    url: String,
    timeout: Duration,
}

impl HttpTermSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        Ok(Self {
            client: http::build_client(timeout)?,
            url: url.into(),
            timeout,
        })
    }
}

impl TermSource for HttpTermSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch_page(&self) -> Result<String, DataError> {
        log::info!("fetching term page {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| http::classify(e, &self.url, self.timeout))?;
        let resp = http::check_status(resp, &self.url)?;
        resp.text()
            .map_err(|e| DataError::InvalidResponse(format!("unreadable page body: {e}")))
    }
}

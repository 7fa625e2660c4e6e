//! Raw payload cache.
//!
//! Layout: `{cache_dir}/{key}.json`, one file per series set and year range,
//! holding the statistics API response body byte-for-byte.
//!
//! - A present file is valid forever: no expiry, no re-fetch.
//! - Only payloads that parse and report success are written.
//! - Atomic writes (write to .tmp, rename into place).
//! - A cached file that no longer parses is quarantined
//!   (`{file}.quarantined`) and treated as a miss.

use super::provider::{DataError, SeriesProvider, SeriesRequest};
use crate::series::payload::parse_payload;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Identity of a cached payload: which series, which years.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub series_ids: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
}

impl CacheKey {
    pub fn new(series_ids: Vec<String>, start_year: i32, end_year: i32) -> Self {
        Self {
            series_ids,
            start_year,
            end_year,
        }
    }

    /// File name for this key.
    ///
    /// A single series uses its id directly; a set of series is named by a
    /// short blake3 digest of the ids so the name stays bounded.
    pub fn file_name(&self) -> String {
        let stem = match self.series_ids.as_slice() {
            [single] => sanitize(single),
            ids => {
                let joined = ids.join(",");
                let hex = blake3::hash(joined.as_bytes()).to_hex();
                format!("set-{}", &hex[..12])
            }
        };
        format!("{stem}_{}_{}.json", self.start_year, self.end_year)
    }

    pub fn request(&self) -> SeriesRequest {
        SeriesRequest::new(self.series_ids.clone(), self.start_year, self.end_year)
    }
}

impl From<&SeriesRequest> for CacheKey {
    fn from(req: &SeriesRequest) -> Self {
        Self::new(req.series_ids.clone(), req.start_year, req.end_year)
    }
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Where a returned payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Cache,
    Network,
}

/// A raw payload plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPayload {
    pub body: String,
    pub source: PayloadSource,
    pub path: PathBuf,
}

/// One file in the cache directory.
#[derive(Debug, Clone)]
pub struct CacheEntryInfo {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

/// The payload cache.
pub struct PayloadCache {
    cache_dir: PathBuf,
}

impl PayloadCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Root directory of the cache.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Read a cached payload. `Ok(None)` is a miss, not an error.
    pub fn lookup(&self, key: &CacheKey) -> Result<Option<String>, DataError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let body = fs::read_to_string(&path)
            .map_err(|e| DataError::CacheError(format!("read {}: {e}", path.display())))?;

        match parse_payload(&body) {
            Ok(_) => Ok(Some(body)),
            Err(e) => {
                let quarantine = path.with_extension("json.quarantined");
                log::warn!(
                    "quarantining unusable cache file {}: {e}",
                    path.display()
                );
                let _ = fs::rename(&path, &quarantine);
                Ok(None)
            }
        }
    }

    /// Persist a payload verbatim. Refuses bodies that are not usable payloads.
    pub fn store(&self, key: &CacheKey, body: &str) -> Result<PathBuf, DataError> {
        parse_payload(body)?;

        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| DataError::CacheError(format!("failed to create dir: {e}")))?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, body)
            .map_err(|e| DataError::CacheError(format!("write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::CacheError(format!("atomic rename failed: {e}"))
        })?;
        Ok(path)
    }

    /// Read-through load: return the cached payload if present, otherwise
    /// fetch from `provider`, persist, and return it.
    ///
    /// With `force`, the cached file is ignored and replaced on success.
    /// Nothing is written when the fetch fails or the body is unusable.
    pub fn fetch_or_load(
        &self,
        key: &CacheKey,
        provider: &dyn SeriesProvider,
        force: bool,
    ) -> Result<LoadedPayload, DataError> {
        let path = self.path_for(key);

        if !force {
            if let Some(body) = self.lookup(key)? {
                log::info!("cache hit: {}", path.display());
                return Ok(LoadedPayload {
                    body,
                    source: PayloadSource::Cache,
                    path,
                });
            }
            log::info!("cache miss: {}", path.display());
        } else {
            log::info!("forced refresh: {}", path.display());
        }

        let body = provider.fetch_raw(&key.request())?;
        let path = self.store(key, &body)?;
        log::info!("cached {} bytes from {}", body.len(), provider.name());

        Ok(LoadedPayload {
            body,
            source: PayloadSource::Network,
            path,
        })
    }

    /// Cached payload files, sorted by name.
    pub fn entries(&self) -> Result<Vec<CacheEntryInfo>, DataError> {
        if !self.cache_dir.exists() {
            return Ok(Vec::new());
        }
        let dir = fs::read_dir(&self.cache_dir)
            .map_err(|e| DataError::CacheError(format!("read dir: {e}")))?;

        let mut out = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| DataError::CacheError(format!("dir entry: {e}")))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let meta = entry.metadata().ok();
            out.push(CacheEntryInfo {
                file_name: entry.file_name().to_string_lossy().to_string(),
                size: meta.as_ref().map(|m| m.len()).unwrap_or(0),
                modified: meta
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Local>::from),
                path,
            });
        }
        out.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(out)
    }

    /// Delete every cached payload. Returns the removed paths.
    pub fn clear(&self) -> Result<Vec<PathBuf>, DataError> {
        let mut removed = Vec::new();
        for entry in self.entries()? {
            fs::remove_file(&entry.path)
                .map_err(|e| DataError::CacheError(format!("remove {}: {e}", entry.path.display())))?;
            removed.push(entry.path);
        }
        Ok(removed)
    }
}

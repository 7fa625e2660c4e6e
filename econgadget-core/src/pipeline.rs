//! Pipeline: terms + cached payload -> normalized series -> chart data.
//!
//! The pipeline borrows its collaborators so tests can swap in fixtures for
//! the term page and the statistics API.

use crate::config::{AppConfig, ConfigError};
use crate::data::bls::BlsProvider;
use crate::data::cache::{CacheKey, PayloadCache, PayloadSource};
use crate::data::provider::{DataError, SeriesProvider};
use crate::domain::{Dataset, TermRecord};
use crate::overlay::{align, ChartData, DisplayWindow};
use crate::series::normalize::{normalize_body, Normalized};
use crate::terms::extract::{extract_terms, Extraction};
use crate::terms::source::{HttpTermSource, TermSource};
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// A dataset loaded through the cache and normalized.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub key: CacheKey,
    pub source: PayloadSource,
    pub path: PathBuf,
    pub normalized: Normalized,
}

/// Chart data plus how it was obtained.
#[derive(Debug, Clone)]
pub struct ChartOutcome {
    pub chart: ChartData,
    pub source: PayloadSource,
    pub skipped_points: usize,
    /// Set when the term page could not be loaded and the chart has no overlays.
    pub terms_warning: Option<String>,
}

pub struct Pipeline<'a> {
    terms: &'a dyn TermSource,
    provider: &'a dyn SeriesProvider,
    cache: &'a PayloadCache,
    config: &'a AppConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        terms: &'a dyn TermSource,
        provider: &'a dyn SeriesProvider,
        cache: &'a PayloadCache,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            terms,
            provider,
            cache,
            config,
        }
    }

    /// Fetch the term page (never cached) and extract every table row.
    pub fn extract_terms(&self, today: NaiveDate) -> Result<Extraction, DataError> {
        let page = self.terms.fetch_page()?;
        let extraction = extract_terms(&page, today.year(), &self.config.extract);

        if extraction.tables_used == 0 {
            log::warn!("no qualifying tables on {}", self.terms.name());
        }
        for skip in &extraction.skipped {
            log::debug!(
                "skipped term row {}/{}: {}",
                skip.table,
                skip.row,
                skip.reason
            );
        }
        log::info!(
            "extracted {} terms ({} rows skipped)",
            extraction.records.len(),
            extraction.skipped.len()
        );
        Ok(extraction)
    }

    /// Terms that ended within the configured recency span, in page order.
    pub fn recent_terms(&self, today: NaiveDate) -> Result<Vec<TermRecord>, DataError> {
        let extraction = self.extract_terms(today)?;
        Ok(extraction.recent(today.year(), self.config.recent_years as i32))
    }

    /// Cache key for `dataset` as of `today`.
    pub fn cache_key(&self, dataset: Dataset, today: NaiveDate) -> CacheKey {
        let end = today.year();
        CacheKey::new(
            dataset.series_ids(),
            end - self.config.window_years as i32,
            end,
        )
    }

    /// Load the dataset's payload through the cache and normalize it.
    ///
    /// `force` (or `force_refresh` in the config) skips the cache read.
    pub fn load_dataset(
        &self,
        dataset: Dataset,
        today: NaiveDate,
        force: bool,
    ) -> Result<LoadedDataset, DataError> {
        let key = self.cache_key(dataset, today);
        let force = force || self.config.force_refresh;
        let loaded = self.cache.fetch_or_load(&key, self.provider, force)?;
        let normalized = normalize_body(&loaded.body)?;

        for skip in &normalized.skipped {
            log::debug!(
                "skipped point {}[{}]: {}",
                skip.series_id,
                skip.index,
                skip.reason
            );
        }

        Ok(LoadedDataset {
            dataset,
            key,
            source: loaded.source,
            path: loaded.path,
            normalized,
        })
    }

    pub fn window(&self, today: NaiveDate) -> DisplayWindow {
        DisplayWindow::trailing_years(today, self.config.window_years)
    }

    /// Build chart data for `dataset`.
    ///
    /// A failed series load fails the call. A failed term fetch only drops
    /// the overlays.
    pub fn chart(
        &self,
        dataset: Dataset,
        today: NaiveDate,
        force: bool,
    ) -> Result<ChartOutcome, DataError> {
        let (terms, terms_warning) = match self.recent_terms(today) {
            Ok(terms) => (terms, None),
            Err(e) => {
                log::warn!("term overlays unavailable: {e}");
                (Vec::new(), Some(e.to_string()))
            }
        };

        let loaded = self.load_dataset(dataset, today, force)?;
        let chart = align(
            dataset,
            &loaded.normalized.observations,
            &terms,
            &self.window(today),
        );

        Ok(ChartOutcome {
            chart,
            source: loaded.source,
            skipped_points: loaded.normalized.skipped.len(),
            terms_warning,
        })
    }
}

/// Network-backed collaborators built from a config.
pub struct LiveServices {
    pub terms: HttpTermSource,
    pub provider: BlsProvider,
    pub cache: PayloadCache,
}

impl LiveServices {
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let timeout = config.timeout();
        Ok(Self {
            terms: HttpTermSource::new(config.terms_url.clone(), timeout)?,
            provider: BlsProvider::new(config.api_url.clone(), config.api_key.clone(), timeout)?,
            cache: PayloadCache::new(config.resolved_cache_dir()?),
        })
    }

    pub fn pipeline<'a>(&'a self, config: &'a AppConfig) -> Pipeline<'a> {
        Pipeline::new(&self.terms, &self.provider, &self.cache, config)
    }
}

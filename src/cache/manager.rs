//! Refresh-or-read orchestration for the cached one-call document
//!
//! Provides a `WeatherCache` that decides whether the stored document is
//! stale, refreshes it from the provider when it is, and hands back a decoded
//! snapshot. A failed refresh writes the empty sentinel, which the next read
//! treats as stale.

use std::io;

use chrono::{Duration, Utc};
use thiserror::Error;

use super::store::{CacheStore, CachedDocument};
use crate::data::{parse_snapshot, Fetch, FetchError, ForecastRequest, ParseError, WeatherSnapshot};

/// Default freshness window for the forecast document
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Errors that can occur when reading or refreshing the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache resource was never provisioned
    #[error("Cache file is missing: {0}")]
    Missing(String),

    /// The cache resource exists but could not be read or written
    #[error("Cache I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Refresh was needed and the provider call failed
    #[error("Could not fetch weather data: {0}")]
    FetchFailed(#[from] FetchError),

    /// The document did not decode into a snapshot
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CacheError {
    /// Whether this error means the deployment is broken rather than the provider
    pub fn is_provisioning(&self) -> bool {
        matches!(self, Self::Missing(_) | Self::Io(_))
    }
}

/// Lazily refreshed cache of the provider's one-call document
#[derive(Debug)]
pub struct WeatherCache<S, F> {
    store: S,
    fetcher: F,
    ttl: Duration,
}

impl<S: CacheStore, F: Fetch> WeatherCache<S, F> {
    /// Creates a cache with the default five-minute TTL
    pub fn new(store: S, fetcher: F) -> Self {
        Self::with_ttl(store, fetcher, DEFAULT_TTL_SECONDS)
    }

    /// Creates a cache whose documents go stale after `ttl_seconds`
    pub fn with_ttl(store: S, fetcher: F, ttl_seconds: u64) -> Self {
        Self {
            store,
            fetcher,
            ttl: Duration::seconds(i64::from(u32::try_from(ttl_seconds).unwrap_or(u32::MAX))),
        }
    }

    /// Configured TTL in whole seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the snapshot for `request`, refreshing from the provider if stale
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - From the stored document or a fresh fetch
    /// * `Err(CacheError::Missing)` - The store was never provisioned
    /// * `Err(CacheError::FetchFailed)` - Refresh failed; the store now holds `""`
    /// * `Err(CacheError::Parse)` - The document did not decode
    pub async fn get_snapshot(&self, request: &ForecastRequest) -> Result<WeatherSnapshot, CacheError> {
        let document = self.read_document()?;

        if !self.is_stale(&document) {
            tracing::debug!(cache = %self.store.describe(), "serving cached weather document");
            return Ok(parse_snapshot(&document.raw_body)?);
        }

        tracing::info!(
            cache = %self.store.describe(),
            empty = document.raw_body.is_empty(),
            "weather cache stale, refreshing"
        );

        let body = match self.fetcher.fetch(request).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(reason = %e.reason(), "weather fetch failed, clearing cache");
                self.clear();
                return Err(e.into());
            }
        };

        match parse_snapshot(&body) {
            Ok(snapshot) => {
                if let Err(e) = self.store.write(&body) {
                    tracing::warn!(
                        cache = %self.store.describe(),
                        error = %e,
                        "could not store refreshed weather document"
                    );
                }
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(error = %e, "provider returned an undecodable document, clearing cache");
                self.clear();
                Err(e.into())
            }
        }
    }

    /// Writes the empty sentinel; a failed write is logged, not returned
    fn clear(&self) {
        if let Err(e) = self.store.write("") {
            tracing::warn!(cache = %self.store.describe(), error = %e, "could not clear weather cache");
        }
    }

    /// Decodes the stored document without refreshing it
    ///
    /// Returns `Ok(None)` when the store is missing or holds the empty sentinel.
    pub fn peek_snapshot(&self) -> Result<Option<WeatherSnapshot>, CacheError> {
        let Some(document) = self.store.read()? else {
            return Ok(None);
        };
        if document.raw_body.is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_snapshot(&document.raw_body)?))
    }

    fn read_document(&self) -> Result<CachedDocument, CacheError> {
        self.store
            .read()?
            .ok_or_else(|| CacheError::Missing(self.store.describe()))
    }

    /// Stale when older than the TTL or holding the empty sentinel
    fn is_stale(&self, document: &CachedDocument) -> bool {
        document.raw_body.is_empty() || Utc::now() - document.last_written_at > self.ttl
    }
}

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};
use common::{QueryScope, Reading, TimeWindow};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, instrument, trace};

use super::ReadingSource;
use crate::error::FetchError;

/// A cache key for [`ReadingSource::fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub scope: QueryScope,
    pub window: Option<TimeWindow>,
}

/// A caching wrapper for [`ReadingSource`] implementations.
///
/// Successful fetches are memoized per (scope, window) until their TTL runs
/// out or [`ReadingSource::invalidate`] is called. Failures are never cached,
/// so the next call after a failed fetch reaches the inner source again.
///
/// A fetch that was already running when the cache was cleared returns its
/// rows to its caller but does not store them.
pub struct CachedSource<
    S: ReadingSource,
    C: Cached<FetchKey, Vec<Reading>> = TimedSizedCache<FetchKey, Vec<Reading>>,
> {
    /// The wrapped source
    inner: S,
    /// Memoized fetch results
    cache: Arc<Mutex<C>>,
    /// Bumped on every clear; results fetched under an older value are dropped
    generation: AtomicU64,
}

impl<S: ReadingSource, C: Cached<FetchKey, Vec<Reading>>> CachedSource<S, C> {
    /// Creates a new cached source with a custom cache store.
    pub fn new_with_store(inner: S, cache_store: C) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(cache_store)),
            generation: AtomicU64::new(0),
        }
    }

    /// Drops every memoized fetch and returns how many there were.
    pub fn clear_cache(&self) -> usize {
        if let Ok(mut cache) = self.cache.lock() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            let dropped = cache.cache_size();
            cache.cache_clear();
            dropped
        } else {
            0
        }
    }

    /// Returns the current number of memoized fetches.
    pub fn cache_size(&self) -> usize {
        if let Ok(cache) = self.cache.lock() {
            cache.cache_size()
        } else {
            0
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ReadingSource> CachedSource<S, TimedSizedCache<FetchKey, Vec<Reading>>> {
    /// Creates a new cached source holding at most `cache_size` results
    /// (must be non-zero) for `ttl` each.
    pub fn new(inner: S, cache_size: usize, ttl: Duration) -> Self {
        Self::new_with_store(
            inner,
            TimedSizedCache::with_size_and_lifespan(cache_size, ttl.as_secs()),
        )
    }

    /// Creates a new cached source with default settings.
    ///
    /// Default settings:
    /// - Cache size: 100 entries
    /// - TTL: 5 minutes
    pub fn with_defaults(inner: S) -> Self {
        Self::new(inner, 100, Duration::from_secs(300))
    }
}

#[async_trait]
impl<S, C> ReadingSource for CachedSource<S, C>
where
    S: ReadingSource,
    C: Cached<FetchKey, Vec<Reading>> + Send,
{
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        scope: QueryScope,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Reading>, FetchError> {
        let key = FetchKey { scope, window };

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.cache_get(&key) {
                debug!("Serving {} readings from cache", cached.len());
                return Ok(cached.clone());
            }
        }

        trace!("Cache miss, fetching from inner source");
        let generation = self.generation.load(Ordering::SeqCst);
        let readings = self.inner.fetch(scope, window).await?;

        if let Ok(mut cache) = self.cache.lock() {
            if self.generation.load(Ordering::SeqCst) == generation {
                cache.cache_set(key, readings.clone());
            } else {
                debug!("Cache cleared during fetch, not storing {:?}", key);
            }
        }

        Ok(readings)
    }

    fn invalidate(&self) -> usize {
        let dropped = self.clear_cache();
        debug!("Invalidated {} cached fetches", dropped);
        dropped + self.inner.invalidate()
    }
}

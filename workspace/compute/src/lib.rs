pub mod error;
pub mod reshape;
pub mod selector;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use source::{CachedSource, DatabaseGateway, LazyConnection};

/// Default time a fetched result stays memoized.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Returns the pre-configured source the dashboard uses: the database
/// gateway behind a TTL cache.
///
/// `cache_size` is the number of distinct (scope, window) results kept and
/// must be non-zero.
pub fn default_source(
    connection: Arc<LazyConnection>,
    cache_size: usize,
    ttl: Duration,
) -> CachedSource<DatabaseGateway> {
    CachedSource::new(DatabaseGateway::new(connection), cache_size, ttl)
}

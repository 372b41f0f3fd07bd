//! Where readings come from: the database gateway, the lazily opened
//! connection it uses, and a caching wrapper around any source.

pub mod cache;
pub mod connection;
pub mod gateway;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use common::{QueryScope, Reading, TimeWindow};

use crate::error::FetchError;

/// A source of weather readings.
///
/// Implementations return readings ordered by `recorded_at` descending,
/// capped at [`QueryScope::row_limit`]. An empty vector means the query ran
/// and matched nothing; failures are reported through [`FetchError`].
#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn fetch(
        &self,
        scope: QueryScope,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Reading>, FetchError>;

    /// Drops anything memoized so the next fetch reaches the data source.
    /// Returns the number of entries dropped.
    fn invalidate(&self) -> usize {
        0
    }
}

pub use cache::{CachedSource, FetchKey};
pub use connection::LazyConnection;
pub use gateway::DatabaseGateway;

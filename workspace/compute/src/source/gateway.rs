use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{QueryScope, Reading, TimeWindow};
use model::entities::weather_log;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{debug, info, instrument};

use super::{LazyConnection, ReadingSource};
use crate::error::FetchError;

/// Reads weather logs from the database.
///
/// Every filter value is bound as a statement parameter by the query builder.
#[derive(Debug, Clone)]
pub struct DatabaseGateway {
    connection: Arc<LazyConnection>,
}

impl DatabaseGateway {
    pub fn new(connection: Arc<LazyConnection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<LazyConnection> {
        &self.connection
    }
}

fn to_reading(model: weather_log::Model) -> Reading {
    Reading::new(model.recorded_at, model.temperature, model.city)
}

#[async_trait]
impl ReadingSource for DatabaseGateway {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        scope: QueryScope,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Reading>, FetchError> {
        let db = self.connection.get().await?;

        let mut query = weather_log::Entity::find();
        if let QueryScope::SingleCity(city) = scope {
            query = query.filter(weather_log::Column::City.eq(city.as_str()));
        }
        if let Some(window) = window {
            let since = Utc::now().naive_utc() - window.duration();
            debug!("Restricting readings to recorded_at >= {}", since);
            query = query.filter(weather_log::Column::RecordedAt.gte(since));
        }

        let rows = query
            .order_by_desc(weather_log::Column::RecordedAt)
            .order_by_desc(weather_log::Column::Id)
            .limit(scope.row_limit())
            .all(db)
            .await?;

        info!("Fetched {} readings for {:?}", rows.len(), scope);
        Ok(rows.into_iter().map(to_reading).collect())
    }
}

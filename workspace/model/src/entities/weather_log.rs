use sea_orm::entity::prelude::*;

/// One temperature observation logged by the ingestion job.
///
/// Rows are written by an external process and only ever read here.
/// `id` is a surrogate key; several rows may share the same
/// (`recorded_at`, `city`) pair when collection runs overlap.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weather_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// When the observation was taken (naive, as stored by the ingestion job).
    pub recorded_at: DateTime,
    /// Temperature in degrees Celsius.
    #[sea_orm(column_type = "Double")]
    pub temperature: f64,
    /// City display name, e.g. "New Delhi".
    #[sea_orm(indexed)]
    pub city: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeatherLogs::Table)
                    .if_not_exists()
                    .col(pk_auto(WeatherLogs::Id))
                    .col(timestamp(WeatherLogs::RecordedAt))
                    .col(double(WeatherLogs::Temperature))
                    .col(string(WeatherLogs::City))
                    .to_owned(),
            )
            .await?;

        // Both query variants order by recorded_at, the single city one filters by city first.
        manager
            .create_index(
                Index::create()
                    .name("idx_weather_logs_city_recorded_at")
                    .table(WeatherLogs::Table)
                    .col(WeatherLogs::City)
                    .col(WeatherLogs::RecordedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weather_logs_recorded_at")
                    .table(WeatherLogs::Table)
                    .col(WeatherLogs::RecordedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeatherLogs {
    Table,
    Id,
    RecordedAt,
    Temperature,
    City,
}

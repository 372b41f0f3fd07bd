//! SeaORM entities for the weather reporting tables.
//! The schema is owned by the ingestion side; we only describe it here.

pub mod weather_log;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::weather_log::Entity as WeatherLog;
}

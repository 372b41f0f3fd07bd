use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{info, debug, trace, error};

use crate::config::DatabaseSettings;

pub async fn init_database(settings: &DatabaseSettings) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    let options = settings.connect_options()?;
    debug!("Database URL scheme: {}", options.get_url().split(':').next().unwrap_or_default());

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match Database::connect(options).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

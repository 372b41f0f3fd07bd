use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::{CacheSettings, DatabaseSettings};
use commands::{init_database, serve};

#[derive(Parser)]
#[command(name = "weatherdash")]
#[command(about = "Weather dashboard API over logged city temperature readings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        #[command(flatten)]
        database: DatabaseSettings,

        #[command(flatten)]
        cache: CacheSettings,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Create the weather_logs table using migrations
    ///
    /// Meant for local development and test databases; production tables
    /// are owned by the ingestion job.
    InitDb {
        #[command(flatten)]
        database: DatabaseSettings,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { database, cache, bind_address } => {
                serve(&database, &cache, &bind_address).await?;
            }
            Commands::InitDb { database } => {
                init_database(&database).await?;
            }
        }
        Ok(())
    }
}

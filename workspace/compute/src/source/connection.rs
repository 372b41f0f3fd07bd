use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, trace};

use crate::error::FetchError;

/// The process-wide database handle, opened on first use.
///
/// Owned by the application state and handed to the gateway. Only one pool
/// is ever created; a failed attempt leaves the cell empty so the next
/// caller tries again. The pool serializes access to the underlying
/// sessions, so the handle can be shared between concurrent requests.
#[derive(Debug)]
pub struct LazyConnection {
    options: ConnectOptions,
    cell: OnceCell<DatabaseConnection>,
}

impl LazyConnection {
    pub fn new(options: ConnectOptions) -> Self {
        Self {
            options,
            cell: OnceCell::new(),
        }
    }

    /// Wraps a connection that is already open.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            options: ConnectOptions::new(String::new()),
            cell: OnceCell::from(db),
        }
    }

    /// Returns the shared connection, opening it if this is the first use.
    pub async fn get(&self) -> Result<&DatabaseConnection, FetchError> {
        trace!("Acquiring database connection");
        self.cell
            .get_or_try_init(|| async {
                info!("Opening database connection");
                match Database::connect(self.options.clone()).await {
                    Ok(db) => {
                        debug!("Database connection established");
                        Ok(db)
                    }
                    Err(e) => {
                        error!("Failed to connect to database: {}", e);
                        Err(FetchError::Connection(e.to_string()))
                    }
                }
            })
            .await
    }

    /// Whether the connection has been opened already.
    pub fn is_open(&self) -> bool {
        self.cell.initialized()
    }

    /// Opens the connection if needed and checks it still answers.
    pub async fn ping(&self) -> Result<(), FetchError> {
        let db = self.get().await?;
        db.ping()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))
    }
}

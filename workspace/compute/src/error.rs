use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

/// Failure to read from the data source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The database could not be reached or authenticated against
    #[error("Connection error: {0}")]
    Connection(String),

    /// The statement could not be executed against the schema
    #[error("Query error: {0}")]
    Query(DbErr),
}

impl From<DbErr> for FetchError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                let err = FetchError::Connection(error.to_string());
                error!(?err, "Lost connection to the data source");
                err
            }
            other => {
                let err = FetchError::Query(other);
                error!(?err, "Query against weather_logs failed");
                err
            }
        }
    }
}

/// A dashboard selection that does not map to a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        match error {
            polars::error::PolarsError::NoData(_) => {
                let err = ComputeError::DataFrame(format!("No data: {}", error));
                error!(?err, "DataFrame error: No data");
                err
            }
            polars::error::PolarsError::ShapeMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Shape mismatch: {}", error));
                error!(?err, "DataFrame error: Shape mismatch");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Schema mismatch: {}", error));
                error!(?err, "DataFrame error: Schema mismatch");
                err
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = ComputeError::DataFrame(format!("Column not found: {}", error));
                error!(?err, "DataFrame error: Column not found");
                err
            }
            _ => {
                let err = ComputeError::Series(format!("Series error: {}", error));
                error!(?err, "Series error");
                err
            }
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

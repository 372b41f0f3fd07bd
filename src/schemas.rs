use common::{
    ApiResponse, Chart, City, DashboardView, Metrics, QueryScope, Reading, SeriesPoint,
    SeriesTable, TimeWindow, ViewStatus,
};
use compute::source::{LazyConnection, ReadingSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Lazily opened database handle
    pub connection: Arc<LazyConnection>,
    /// Cached reading source used by the dashboard
    pub source: Arc<dyn ReadingSource>,
}

impl AppState {
    pub fn new(connection: Arc<LazyConnection>, source: Arc<dyn ReadingSource>) -> Self {
        Self { connection, source }
    }
}

/// Query parameters for the dashboard endpoint
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// City to show, e.g. "New York"
    pub city: Option<String>,
    /// Compare every city instead of showing one
    pub compare_all: Option<bool>,
    /// Only include readings from the last N hours
    pub window_hours: Option<u32>,
    /// Include the fetched rows in the response
    pub include_raw: Option<bool>,
}

/// Query parameters for the comparison endpoint
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComparisonQuery {
    /// Only include readings from the last N hours
    pub window_hours: Option<u32>,
    /// Include the fetched rows in the response
    pub include_raw: Option<bool>,
}

/// Result of a cache refresh
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    /// Number of memoized results dropped
    pub invalidated: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::cities::get_cities,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::get_comparison,
        crate::handlers::refresh::refresh,
    ),
    components(
        schemas(
            ApiResponse<DashboardView>,
            ApiResponse<Vec<City>>,
            ApiResponse<RefreshResponse>,
            ErrorResponse,
            HealthResponse,
            RefreshResponse,
            DashboardQuery,
            ComparisonQuery,
            DashboardView,
            ViewStatus,
            Metrics,
            Chart,
            City,
            QueryScope,
            TimeWindow,
            Reading,
            SeriesPoint,
            SeriesTable,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Weather dashboard endpoints"),
    ),
    info(
        title = "Weatherdash API",
        description = "Recent city temperature readings as dashboard metrics and chart series",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

//! Common transport-layer types shared between the backend and its clients.
//! These structs are what the dashboard endpoints serialize, so a client can
//! deserialize responses without duplicating shapes.

mod city;
mod series;
mod view;

pub use city::{City, QueryScope, TimeWindow, UnknownCity};
pub use series::{Reading, SeriesPoint, SeriesTable};
pub use view::{Chart, DashboardView, Metrics, ViewStatus};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

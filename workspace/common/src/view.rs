use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{City, QueryScope, Reading, SeriesPoint, SeriesTable};

/// Outcome of the fetch behind a dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewStatus {
    /// Rows were fetched.
    Ready,
    /// The query ran but matched nothing yet.
    NoData,
    /// The data source could not be reached or queried.
    Unavailable { cause: String },
}

/// The three headline figures shown above the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Metrics {
    /// Temperature of the most recent reading
    pub current_temperature: f64,
    /// Current temperature formatted for display, e.g. "21.5 °C"
    pub current_temperature_label: String,
    /// Timestamp of the most recent reading
    pub last_updated_at: NaiveDateTime,
    /// Time of the most recent reading as HH:MM
    pub last_updated: String,
    /// Number of rows fetched
    pub data_points: usize,
}

/// Chart data, one line or one line per city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Single { city: City, points: Vec<SeriesPoint> },
    Comparison { table: SeriesTable },
}

/// Everything a client needs to render one dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    /// Page heading
    pub title: String,
    /// Scope the rows were fetched for
    pub scope: QueryScope,
    pub status: ViewStatus,
    /// User-facing note for the no-data and unavailable states
    pub message: Option<String>,
    pub metrics: Option<Metrics>,
    pub chart: Option<Chart>,
    /// Fetched rows, newest first; only present when requested
    pub raw: Option<Vec<Reading>>,
}

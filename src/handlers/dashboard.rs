use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ApiResponse, DashboardView, ViewStatus};
use compute::selector::{select, SelectionRequest};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::helpers::converters::build_dashboard_view;
use crate::schemas::{AppState, ComparisonQuery, DashboardQuery, ErrorResponse};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ErrorResponse>)>;

async fn render(state: &AppState, request: SelectionRequest, include_raw: bool) -> HandlerResult<DashboardView> {
    let selection = match select(&request) {
        Ok(selection) => selection,
        Err(e) => {
            warn!("Rejected dashboard selection {:?}: {}", request, e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string(), "INVALID_SELECTION")),
            ));
        }
    };

    trace!("Fetching readings for {:?}", selection);
    let outcome = state.source.fetch(selection.scope, selection.window).await;

    let view = match build_dashboard_view(&selection, outcome, include_raw) {
        Ok(view) => view,
        Err(e) => {
            error!("Failed to build dashboard view: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Internal server error while preparing chart data",
                    "RESHAPE_ERROR",
                )),
            ));
        }
    };

    let message = match &view.status {
        ViewStatus::Ready => {
            debug!("Dashboard ready for {:?}", view.scope);
            "Dashboard retrieved successfully"
        }
        ViewStatus::NoData => {
            info!("No readings yet for {:?}", view.scope);
            "No readings found"
        }
        ViewStatus::Unavailable { cause } => {
            error!("Data source unavailable for {:?}: {}", view.scope, cause);
            "Data source unavailable"
        }
    };

    Ok(Json(ApiResponse {
        data: view,
        message: message.to_string(),
        success: true,
    }))
}

/// Dashboard for one city, or for every city with `compare_all=true`
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard view; check data.status for no-data and unavailable states", body = ApiResponse<DashboardView>),
        (status = 400, description = "Unknown city or invalid window", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardView> {
    let request = SelectionRequest {
        city: query.city,
        compare_all: query.compare_all.unwrap_or(false),
        window_hours: query.window_hours,
    };
    render(&state, request, query.include_raw.unwrap_or(false)).await
}

/// Multi-city comparison, one chart line per city
#[utoipa::path(
    get,
    path = "/api/v1/comparison",
    tag = "dashboard",
    params(ComparisonQuery),
    responses(
        (status = 200, description = "Comparison view; check data.status for no-data and unavailable states", body = ApiResponse<DashboardView>),
        (status = 400, description = "Invalid window", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<ComparisonQuery>,
) -> HandlerResult<DashboardView> {
    let request = SelectionRequest {
        city: None,
        compare_all: true,
        window_hours: query.window_hours,
    };
    render(&state, request, query.include_raw.unwrap_or(false)).await
}

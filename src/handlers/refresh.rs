use axum::{extract::State, response::Json};
use common::ApiResponse;
use tracing::{info, instrument};

use crate::schemas::{AppState, RefreshResponse};

/// Drop memoized readings so the next dashboard request hits the database
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "dashboard",
    responses(
        (status = 200, description = "Cache invalidated", body = ApiResponse<RefreshResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn refresh(State(state): State<AppState>) -> Json<ApiResponse<RefreshResponse>> {
    let invalidated = state.source.invalidate();
    info!("Refresh requested, dropped {} cached results", invalidated);

    Json(ApiResponse {
        data: RefreshResponse { invalidated },
        message: "Cache invalidated".to_string(),
        success: true,
    })
}

use axum::response::Json;
use common::{ApiResponse, City};
use tracing::instrument;

/// List the cities the dashboard can show
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    tag = "dashboard",
    responses(
        (status = 200, description = "Cities retrieved successfully", body = ApiResponse<Vec<City>>)
    )
)]
#[instrument]
pub async fn get_cities() -> Json<ApiResponse<Vec<City>>> {
    Json(ApiResponse {
        data: City::ALL.to_vec(),
        message: "Cities retrieved successfully".to_string(),
        success: true,
    })
}

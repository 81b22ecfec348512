// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::dashboard::DashboardOverview};

// GET /api/dashboard/overview
#[utoipa::path(
    get,
    path = "/api/dashboard/overview",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Stats, five newest items and alerts", body = DashboardOverview)
    )
)]
pub async fn get_overview(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.dashboard_service.get_overview().await?;
    Ok((StatusCode::OK, Json(overview)))
}

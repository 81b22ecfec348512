// src/handlers/health.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{common::error::AppError, config::AppState};

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn health(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    sqlx::query("SELECT 1").execute(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}

// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::User, DataResponse},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    // 0 quando o alvo é admin (ou não existe)
    pub deleted: u64,
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "Users ordered by username", body = [User]))
)]
pub async fn get_all_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok((StatusCode::OK, Json(DataResponse::new(users))))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User and their data requests removed; admins are never removed", body = DeleteUserResponse)
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state.auth_service.delete_user(user_id).await?;
    Ok((StatusCode::OK, Json(DeleteUserResponse { success: true, deleted })))
}

// src/handlers/requests.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    models::{
        request::{CreateRequestPayload, CreateRequestResponse, Decision, PendingRequest, ResolveRequestPayload},
        DataResponse, SuccessResponse,
    },
};

// POST /api/requests
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Request opened", body = CreateRequestResponse),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Unknown item or requester")
    )
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request_data = payload.request_data_text();
    let (Some(qr_timestamp), Some(request_type), Some(request_data)) =
        (payload.qr_timestamp, payload.request_type.as_deref(), request_data)
    else {
        return Err(AppError::InvalidInput("Missing required fields".into()));
    };

    let user_id = match payload.user_id {
        Some(id) => id,
        None => app_state.auth_service.default_admin().await?.id,
    };

    let request_id = app_state
        .request_service
        .create_request(qr_timestamp, user_id, request_type, &request_data)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateRequestResponse { success: true, request_id })))
}

// GET /api/requests
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    responses((status = 200, description = "Pending requests, newest first", body = [PendingRequest]))
)]
pub async fn get_pending_requests(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let requests = app_state.request_service.list_pending().await?;
    Ok((StatusCode::OK, Json(DataResponse::new(requests))))
}

// PUT /api/requests/{id}
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    tag = "Requests",
    request_body = ResolveRequestPayload,
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request resolved", body = SuccessResponse),
        (status = 400, description = "Invalid status or malformed request payload"),
        (status = 403, description = "Resolver is not an admin"),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request already resolved")
    )
)]
pub async fn resolve_request(
    State(app_state): State<AppState>,
    Path(request_id): Path<i64>,
    AppJson(payload): AppJson<ResolveRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let decision = payload
        .status
        .as_deref()
        .and_then(Decision::parse)
        .ok_or_else(|| AppError::InvalidInput("Invalid status".into()))?;

    let admin_id = match payload.admin_id {
        Some(id) => id,
        None => app_state.auth_service.default_admin().await?.id,
    };

    app_state.request_service.resolve(request_id, admin_id, decision).await?;

    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}

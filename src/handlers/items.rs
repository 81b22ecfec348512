// src/handlers/items.rs

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
        inspection::{Inspection, InspectionWithItem},
        item::{CreateItemPayload, CreateItemResponse, Item},
        DataResponse,
    },
};

// POST /api/qr-codes
#[utoipa::path(
    post,
    path = "/api/qr-codes",
    tag = "QR Codes",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item registered and QR image generated", body = CreateItemResponse),
        (status = 400, description = "Invalid data or QR generation failed"),
        (status = 409, description = "Another item was registered in the same second")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.item_service.create_item(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            success: true,
            timestamp: created.timestamp,
            qr_file_path: created.qr_file_path,
        }),
    ))
}

// GET /api/qr-codes
#[utoipa::path(
    get,
    path = "/api/qr-codes",
    tag = "QR Codes",
    responses((status = 200, description = "All items, newest first, under `data`", body = [Item]))
)]
pub async fn get_all_items(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.item_service.list_items().await?;
    Ok((StatusCode::OK, Json(DataResponse::new(items))))
}

// GET /api/qr-codes/{timestamp}
#[utoipa::path(
    get,
    path = "/api/qr-codes/{timestamp}",
    tag = "QR Codes",
    params(("timestamp" = i64, Path, description = "Item key (creation timestamp)")),
    responses(
        (status = 200, description = "Item", body = Item),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(timestamp): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.item_service.get_item(timestamp).await?;
    Ok((StatusCode::OK, Json(DataResponse::new(item))))
}

// GET /api/qr-codes/{timestamp}/inspections
#[utoipa::path(
    get,
    path = "/api/qr-codes/{timestamp}/inspections",
    tag = "Inspections",
    params(("timestamp" = i64, Path, description = "Item key (creation timestamp)")),
    responses((status = 200, description = "Inspections of the item", body = [Inspection]))
)]
pub async fn get_item_inspections(
    State(app_state): State<AppState>,
    Path(timestamp): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let inspections = app_state.item_service.list_inspections_for_item(timestamp).await?;
    Ok((StatusCode::OK, Json(DataResponse::new(inspections))))
}

// GET /api/inspections
#[utoipa::path(
    get,
    path = "/api/inspections",
    tag = "Inspections",
    responses((status = 200, description = "All inspections with item data", body = [InspectionWithItem]))
)]
pub async fn get_all_inspections(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let inspections = app_state.item_service.list_inspections().await?;
    Ok((StatusCode::OK, Json(DataResponse::new(inspections))))
}

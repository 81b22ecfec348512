// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    models::{
        auth::{LoginResponse, LoginUserPayload, RegisterUserPayload, UserRole},
        SuccessResponse,
    },
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login ok", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (username, password) = (payload.username.unwrap_or_default(), payload.password.unwrap_or_default());

    let user = app_state.auth_service.login_user(&username, &password).await?;

    Ok((StatusCode::OK, Json(LoginResponse { success: true, user })))
}

// POST /api/auth/logout (sem sessão no servidor)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Logged out", body = SuccessResponse))
)]
pub async fn logout() -> Json<SuccessResponse> {
    Json(SuccessResponse::ok())
}

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "User created", body = SuccessResponse),
        (status = 400, description = "Missing credentials or username already exists")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let role = payload.role.unwrap_or(UserRole::User);
    let (username, password) = (payload.username.unwrap_or_default(), payload.password.unwrap_or_default());

    app_state.auth_service.register_user(&username, &password, role).await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

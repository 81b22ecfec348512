// src/routes.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/register", post(handlers::auth::register));

    let qr_routes = Router::new()
        .route("/", post(handlers::items::create_item).get(handlers::items::get_all_items))
        .route("/{timestamp}", get(handlers::items::get_item))
        .route("/{timestamp}/inspections", get(handlers::items::get_item_inspections));

    let request_routes = Router::new()
        .route(
            "/",
            post(handlers::requests::create_request).get(handlers::requests::get_pending_requests),
        )
        .route("/{id}", put(handlers::requests::resolve_request));

    let user_routes = Router::new()
        .route("/", get(handlers::users::get_all_users))
        .route("/{id}", delete(handlers::users::delete_user));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/inspections", get(handlers::items::get_all_inspections))
        .route("/api/dashboard/overview", get(handlers::dashboard::get_overview))
        .nest("/api/auth", auth_routes)
        .nest("/api/qr-codes", qr_routes)
        .nest("/api/requests", request_routes)
        .nest("/api/users", user_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

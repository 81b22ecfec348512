// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::register,

        // --- QR Codes / Inspections ---
        handlers::items::create_item,
        handlers::items::get_all_items,
        handlers::items::get_item,
        handlers::items::get_item_inspections,
        handlers::items::get_all_inspections,

        // --- Requests ---
        handlers::requests::create_request,
        handlers::requests::get_pending_requests,
        handlers::requests::resolve_request,

        // --- Users ---
        handlers::users::get_all_users,
        handlers::users::delete_user,

        // --- Dashboard ---
        handlers::dashboard::get_overview,

        handlers::health::health,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::UserSummary,
            models::auth::LoginUserPayload,
            models::auth::RegisterUserPayload,
            models::auth::LoginResponse,

            // --- Items ---
            models::item::Item,
            models::item::CreateItemPayload,
            models::item::CreateItemResponse,

            // --- Inspections ---
            models::inspection::RepairNeed,
            models::inspection::Inspection,
            models::inspection::InspectionWithItem,

            // --- Requests ---
            models::request::RequestStatus,
            models::request::DataRequest,
            models::request::PendingRequest,
            models::request::InspectionReportPayload,
            models::request::CreateRequestPayload,
            models::request::CreateRequestResponse,
            models::request::ResolveRequestPayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::AlertKind,
            models::dashboard::Alert,
            models::dashboard::DashboardOverview,

            models::SuccessResponse,
            handlers::users::DeleteUserResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login and user registration"),
        (name = "QR Codes", description = "Item registry"),
        (name = "Inspections", description = "Inspection history"),
        (name = "Requests", description = "Change requests and approval workflow"),
        (name = "Users", description = "User administration"),
        (name = "Dashboard", description = "Derived metrics and alerts"),
        (name = "Health", description = "Liveness check"),
    )
)]
pub struct ApiDoc;

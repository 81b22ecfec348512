pub mod auth;
pub mod dashboard_service;
pub mod item_service;
pub mod qr_renderer;
pub mod request_service;

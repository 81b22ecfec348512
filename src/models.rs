pub mod auth;
pub mod dashboard;
pub mod inspection;
pub mod item;
pub mod request;

use serde::Serialize;
use utoipa::ToSchema;

// Envelope padrão das listagens: { "success": true, "data": ... }
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

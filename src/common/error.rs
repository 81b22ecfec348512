use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("QR code {0} not found")]
    ItemNotFound(i64),

    #[error("Request {0} not found")]
    RequestNotFound(i64),

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Username already exists")]
    UsernameAlreadyExists,

    // Dois cadastros no mesmo segundo disputam a mesma chave
    #[error("An item with timestamp {0} already exists, retry the creation")]
    DuplicateTimestamp(i64),

    #[error("Request {id} is already {status}")]
    InvalidState { id: i64, status: String },

    #[error("Malformed request payload: {0}")]
    MalformedPayload(String),

    #[error("Failed to save QR code: {0}")]
    QrGeneration(String),

    // Variante para erros de banco de dados
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::UsernameAlreadyExists
            | AppError::MalformedPayload(_)
            | AppError::QrGeneration(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ItemNotFound(_) | AppError::RequestNotFound(_) | AppError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::DuplicateTimestamp(_) | AppError::InvalidState { .. } => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Retorna todos os detalhes da validação, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "error": "One or more fields are invalid.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let message = if status.is_server_error() {
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            tracing::error!("Internal server error: {}", self);
            "An unexpected error occurred.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_client_statuses() {
        assert_eq!(AppError::ItemNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidState { id: 1, status: "approved".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::MalformedPayload("missing inspection_time".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::QrGeneration("disk full".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_errors_are_internal() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_state_message_names_the_status() {
        let err = AppError::InvalidState { id: 7, status: "rejected".into() };
        assert_eq!(err.to_string(), "Request 7 is already rejected");
    }
}

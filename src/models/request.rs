// src/models/request.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{common::error::AppError, models::inspection::RepairNeed};

/// Tag reconhecida pelo fluxo de aprovação.
pub const INSPECTION_REPORT: &str = "inspection_report";

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// Decisão do administrador: só os dois estados terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(Decision::Approved),
            "rejected" => Some(Decision::Rejected),
            _ => None,
        }
    }
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

// --- Pedido de alteração (tabela 'data_requests') ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DataRequest {
    pub id: i64,
    pub qr_timestamp: i64,
    pub user_id: i64,
    #[schema(example = "inspection_report")]
    pub request_type: String,
    // Payload opaco, serializado como texto
    pub request_data: String,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub resolved_by: Option<i64>,
}

// Linha da fila de pendências, com dados do solicitante e do item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PendingRequest {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: DataRequest,
    pub username: String,
    pub item_type: String,
    pub lot_number: String,
}

// --- Payloads tipados, decodificados na resolução ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InspectionReportPayload {
    pub inspection_time: String,
    pub need_replacement_repair: RepairNeed,
    #[serde(default)]
    pub inspection_report: Option<String>,
}

/// Conteúdo de um pedido, discriminado pelo `request_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    InspectionReport(InspectionReportPayload),
    // Qualquer outra tag: aprovar só muda o status
    Other(String),
}

impl RequestPayload {
    pub fn decode(request_type: &str, request_data: &str) -> Result<Self, AppError> {
        match request_type {
            INSPECTION_REPORT => {
                let payload: InspectionReportPayload = serde_json::from_str(request_data)
                    .map_err(|e| AppError::MalformedPayload(e.to_string()))?;
                if payload.inspection_time.trim().is_empty() {
                    return Err(AppError::MalformedPayload("inspection_time is empty".into()));
                }
                Ok(RequestPayload::InspectionReport(payload))
            }
            other => Ok(RequestPayload::Other(other.to_string())),
        }
    }
}

// --- DTOs HTTP ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestPayload {
    pub qr_timestamp: Option<i64>,
    // Sem sessão: quando ausente, o pedido é feito pela conta admin padrão
    pub user_id: Option<i64>,
    pub request_type: Option<String>,
    // Texto JSON (como o frontend envia) ou objeto JSON
    #[schema(value_type = Object)]
    pub request_data: Option<serde_json::Value>,
}

impl CreateRequestPayload {
    /// Normaliza `request_data` para o texto que vai ao banco.
    pub fn request_data_text(&self) -> Option<String> {
        match &self.request_data {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) if s.is_empty() => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(value) => Some(value.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRequestResponse {
    pub success: bool,
    pub request_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequestPayload {
    #[schema(example = "approved")]
    pub status: Option<String>,
    pub admin_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_inspection_report_with_optional_text() {
        let raw = r#"{"inspection_time":"2024-01-01T00:00:00","need_replacement_repair":"yes"}"#;
        let payload = RequestPayload::decode(INSPECTION_REPORT, raw).unwrap();
        assert_eq!(
            payload,
            RequestPayload::InspectionReport(InspectionReportPayload {
                inspection_time: "2024-01-01T00:00:00".into(),
                need_replacement_repair: RepairNeed::Yes,
                inspection_report: None,
            })
        );
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let raw = r#"{"need_replacement_repair":"no","inspection_report":"ok"}"#;
        let err = RequestPayload::decode(INSPECTION_REPORT, raw).unwrap_err();
        assert!(matches!(err, AppError::MalformedPayload(msg) if msg.contains("inspection_time")));
    }

    #[test]
    fn unknown_repair_value_is_malformed() {
        let raw = r#"{"inspection_time":"2024-01-01","need_replacement_repair":"maybe"}"#;
        assert!(matches!(
            RequestPayload::decode(INSPECTION_REPORT, raw),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn other_request_types_are_not_parsed() {
        let payload = RequestPayload::decode("status_change", "not even json").unwrap();
        assert_eq!(payload, RequestPayload::Other("status_change".into()));
    }

    #[test]
    fn request_data_accepts_strings_and_objects() {
        let as_text = CreateRequestPayload {
            qr_timestamp: Some(1),
            user_id: None,
            request_type: Some(INSPECTION_REPORT.into()),
            request_data: Some(serde_json::Value::String(r#"{"a":1}"#.into())),
        };
        assert_eq!(as_text.request_data_text().as_deref(), Some(r#"{"a":1}"#));

        let as_object = CreateRequestPayload {
            request_data: Some(serde_json::json!({"a": 1})),
            ..as_text
        };
        assert_eq!(as_object.request_data_text().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn decision_only_accepts_terminal_states() {
        assert_eq!(Decision::parse("approved"), Some(Decision::Approved));
        assert_eq!(Decision::parse("rejected"), Some(Decision::Rejected));
        assert_eq!(Decision::parse("pending"), None);
    }
}

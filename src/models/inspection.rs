// src/models/inspection.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Guardado como texto "yes"/"no", nunca como booleano
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepairNeed {
    Yes,
    No,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inspection {
    pub id: i64,
    pub qr_timestamp: i64,
    #[schema(example = "2024-01-01T00:00:00")]
    pub inspection_time: String,
    pub inspection_report: Option<String>,
    pub need_replacement_repair: RepairNeed,
    pub created_at: NaiveDateTime,
    // Pedido que originou a inspeção
    pub request_id: Option<i64>,
}

// Inspeção + dados do item, para a listagem geral e os alertas do dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InspectionWithItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub inspection: Inspection,
    pub item_type: String,
    pub lot_number: String,
}

/// Linha nova a ser materializada pela aprovação de um pedido.
#[derive(Debug, Clone)]
pub struct NewInspection<'a> {
    pub qr_timestamp: i64,
    pub inspection_time: &'a str,
    pub inspection_report: Option<&'a str>,
    pub need_replacement_repair: RepairNeed,
    pub request_id: i64,
}

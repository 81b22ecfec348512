// src/models/item.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Item rastreado (tabela 'qr_codes') ---
// A chave é o timestamp da criação, atribuído pelo registro e nunca pelo cliente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    #[schema(example = 1717200000)]
    pub timestamp: i64,
    #[schema(example = "Acme Corp")]
    pub vendor_name: String,
    #[schema(example = "LOT-2024-001")]
    pub lot_number: String,
    #[schema(example = "Fire Extinguisher")]
    pub item_type: String,
    #[schema(example = "2023-12-01")]
    pub manufacture_date: String,
    #[schema(example = "2024-01-01")]
    pub supply_date: String,
    #[schema(example = "2 years")]
    pub warranty_period: String,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: NaiveDateTime,
    // Nulo até a imagem ser gerada
    pub qr_file_path: Option<String>,
}

// Payload de criação. Os campos são `Option` para que a ausência vire
// erro de validação (400) e não erro de desserialização.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateItemPayload {
    #[validate(
        required(message = "vendor_name is required."),
        length(min = 1, message = "vendor_name is required.")
    )]
    pub vendor_name: Option<String>,

    #[validate(
        required(message = "lot_number is required."),
        length(min = 1, message = "lot_number is required.")
    )]
    pub lot_number: Option<String>,

    #[validate(
        required(message = "item_type is required."),
        length(min = 1, message = "item_type is required.")
    )]
    pub item_type: Option<String>,

    #[validate(
        required(message = "manufacture_date is required."),
        length(min = 1, message = "manufacture_date is required.")
    )]
    pub manufacture_date: Option<String>,

    #[validate(
        required(message = "supply_date is required."),
        length(min = 1, message = "supply_date is required.")
    )]
    pub supply_date: Option<String>,

    #[validate(
        required(message = "warranty_period is required."),
        length(min = 1, message = "warranty_period is required.")
    )]
    pub warranty_period: Option<String>,
}

/// Campos já validados, prontos para o INSERT.
#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub vendor_name: String,
    pub lot_number: String,
    pub item_type: String,
    pub manufacture_date: String,
    pub supply_date: String,
    pub warranty_period: String,
}

impl TryFrom<CreateItemPayload> for NewItem {
    type Error = validator::ValidationErrors;

    fn try_from(payload: CreateItemPayload) -> Result<Self, Self::Error> {
        payload.validate()?;
        // Após o validate() todos os campos estão presentes.
        Ok(NewItem {
            vendor_name: payload.vendor_name.unwrap_or_default(),
            lot_number: payload.lot_number.unwrap_or_default(),
            item_type: payload.item_type.unwrap_or_default(),
            manufacture_date: payload.manufacture_date.unwrap_or_default(),
            supply_date: payload.supply_date.unwrap_or_default(),
            warranty_period: payload.warranty_period.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateItemResponse {
    pub success: bool,
    pub timestamp: i64,
    #[schema(example = "static/qr_codes/qr_1717200000.png")]
    pub qr_file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CreateItemPayload {
        CreateItemPayload {
            vendor_name: Some("Acme".into()),
            lot_number: Some("L-1".into()),
            item_type: Some("Pump".into()),
            manufacture_date: Some("2023-12-01".into()),
            supply_date: Some("2024-01-01".into()),
            warranty_period: Some("1 year".into()),
        }
    }

    #[test]
    fn complete_payload_converts() {
        let item = NewItem::try_from(complete()).unwrap();
        assert_eq!(item.vendor_name, "Acme");
        assert_eq!(item.warranty_period, "1 year");
    }

    #[test]
    fn missing_or_empty_fields_are_reported() {
        let mut payload = complete();
        payload.lot_number = None;
        payload.supply_date = Some(String::new());

        let errors = NewItem::try_from(payload).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("lot_number"));
        assert!(fields.contains_key("supply_date"));
        assert!(!fields.contains_key("vendor_name"));
    }
}

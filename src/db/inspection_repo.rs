// src/db/inspection_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::inspection::{Inspection, InspectionWithItem, NewInspection},
};

#[derive(Clone, Default)]
pub struct InspectionRepository;

impl InspectionRepository {
    pub fn new() -> Self {
        Self
    }

    // Só é chamado de dentro da transação de resolução de um pedido
    pub async fn create_inspection<'e, E>(
        &self,
        executor: E,
        inspection: &NewInspection<'_>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO inspections (
                qr_timestamp, inspection_time, inspection_report,
                need_replacement_repair, request_id
            ) VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(inspection.qr_timestamp)
        .bind(inspection.inspection_time)
        .bind(inspection.inspection_report)
        .bind(inspection.need_replacement_repair)
        .bind(inspection.request_id)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_for_item<'e, E>(
        &self,
        executor: E,
        qr_timestamp: i64,
    ) -> Result<Vec<Inspection>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inspections = sqlx::query_as::<_, Inspection>(
            "SELECT * FROM inspections WHERE qr_timestamp = ? ORDER BY inspection_time DESC, id DESC",
        )
        .bind(qr_timestamp)
        .fetch_all(executor)
        .await?;
        Ok(inspections)
    }

    pub async fn list_with_items<'e, E>(&self, executor: E) -> Result<Vec<InspectionWithItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inspections = sqlx::query_as::<_, InspectionWithItem>(
            r#"
            SELECT i.*, qc.item_type, qc.lot_number
            FROM inspections i
            JOIN qr_codes qc ON i.qr_timestamp = qc.timestamp
            ORDER BY i.inspection_time DESC, i.id DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(inspections)
    }
}

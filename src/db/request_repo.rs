// src/db/request_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::{db_utils::is_foreign_key_violation, error::AppError},
    models::request::{DataRequest, PendingRequest, RequestStatus},
};

#[derive(Clone, Default)]
pub struct RequestRepository;

impl RequestRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_request<'e, E>(
        &self,
        executor: E,
        qr_timestamp: i64,
        user_id: i64,
        request_type: &str,
        request_data: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO data_requests (qr_timestamp, user_id, request_type, request_data)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(qr_timestamp)
        .bind(user_id)
        .bind(request_type)
        .bind(request_data)
        .execute(executor)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::InvalidInput("Unknown item or requester".into());
            }
            e.into()
        })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<DataRequest>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let request = sqlx::query_as::<_, DataRequest>("SELECT * FROM data_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(request)
    }

    // Fila do admin: pendentes, mais novos primeiro
    pub async fn list_pending<'e, E>(&self, executor: E) -> Result<Vec<PendingRequest>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let requests = sqlx::query_as::<_, PendingRequest>(
            r#"
            SELECT dr.*, u.username, qc.item_type, qc.lot_number
            FROM data_requests dr
            JOIN users u ON dr.user_id = u.id
            JOIN qr_codes qc ON dr.qr_timestamp = qc.timestamp
            WHERE dr.status = 'pending'
            ORDER BY dr.created_at DESC, dr.id DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(requests)
    }

    /// Transição pending -> status. Só toca linhas ainda pendentes;
    /// devolve `false` se o pedido já tinha sido resolvido.
    pub async fn mark_resolved<'e, E>(
        &self,
        executor: E,
        id: i64,
        status: RequestStatus,
        resolved_by: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE data_requests
            SET status = ?, resolved_at = CURRENT_TIMESTAMP, resolved_by = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(status)
        .bind(resolved_by)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

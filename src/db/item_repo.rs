// src/db/item_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    models::item::{Item, NewItem},
};

// Repositório da tabela 'qr_codes'. Sem estado: cada método recebe o executor
// (pool ou transação) para poder participar da transação do chamador.
#[derive(Clone, Default)]
pub struct ItemRepository;

impl ItemRepository {
    pub fn new() -> Self {
        Self
    }

    /// Insere o item com a chave já atribuída.
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        timestamp: i64,
        item: &NewItem,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO qr_codes (
                timestamp, vendor_name, lot_number,
                item_type, manufacture_date, supply_date,
                warranty_period
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(timestamp)
        .bind(&item.vendor_name)
        .bind(&item.lot_number)
        .bind(&item.item_type)
        .bind(&item.manufacture_date)
        .bind(&item.supply_date)
        .bind(&item.warranty_period)
        .execute(executor)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::DuplicateTimestamp(timestamp);
            }
            e.into()
        })?;

        Ok(timestamp)
    }

    pub async fn set_image_path<'e, E>(
        &self,
        executor: E,
        timestamp: i64,
        qr_file_path: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE qr_codes SET qr_file_path = ? WHERE timestamp = ?")
            .bind(qr_file_path)
            .bind(timestamp)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ItemNotFound(timestamp));
        }
        Ok(())
    }

    pub async fn find_by_timestamp<'e, E>(
        &self,
        executor: E,
        timestamp: i64,
    ) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM qr_codes WHERE timestamp = ?")
            .bind(timestamp)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    // Mais novo primeiro
    pub async fn list_items<'e, E>(&self, executor: E) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM qr_codes ORDER BY timestamp DESC")
            .fetch_all(executor)
            .await?;
        Ok(items)
    }
}

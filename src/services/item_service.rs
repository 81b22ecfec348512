// src/services/item_service.rs

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde_json::json;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::{
    common::error::AppError,
    db::{InspectionRepository, ItemRepository},
    models::{
        inspection::{Inspection, InspectionWithItem},
        item::{CreateItemPayload, Item, NewItem},
    },
    services::qr_renderer::QrRenderer,
};

/// O que o cadastro devolve ao cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub timestamp: i64,
    pub qr_file_path: String,
}

#[derive(Clone)]
pub struct ItemService {
    item_repo: ItemRepository,
    inspection_repo: InspectionRepository,
    renderer: Arc<dyn QrRenderer>,
    render_timeout: Duration,
    pool: SqlitePool,
}

impl ItemService {
    pub fn new(
        item_repo: ItemRepository,
        inspection_repo: InspectionRepository,
        renderer: Arc<dyn QrRenderer>,
        render_timeout: Duration,
        pool: SqlitePool,
    ) -> Self {
        Self { item_repo, inspection_repo, renderer, render_timeout, pool }
    }

    // --- CREATE ITEM ---
    // INSERT, geração da imagem e gravação do caminho: tudo numa transação só.
    // Se a imagem falhar (ou estourar o tempo), o item não fica no banco.
    pub async fn create_item(&self, payload: CreateItemPayload) -> Result<CreatedItem, AppError> {
        // 1. Validação (nada toca o banco antes disso)
        let item = NewItem::try_from(payload)?;

        // 2. A chave é o instante da criação, nunca vem do cliente
        let timestamp = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        self.item_repo.create_item(&mut *tx, timestamp, &item).await?;

        // 3. Gera a imagem com o timestamp embutido no payload
        let qr_payload = json!({
            "vendor_name": item.vendor_name,
            "lot_number": item.lot_number,
            "item_type": item.item_type,
            "manufacture_date": item.manufacture_date,
            "supply_date": item.supply_date,
            "warranty_period": item.warranty_period,
            "timestamp": timestamp,
        })
        .to_string();

        let qr_file_path = match self.render(timestamp, qr_payload).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("QR generation failed for item {}, rolling back: {}", timestamp, e);
                self.discard_image(timestamp);
                tx.rollback().await?;
                return Err(e);
            }
        };

        // 4. Grava o caminho e confirma tudo; sem commit, a imagem não fica
        if let Err(e) = self.store_image_path(tx, timestamp, &qr_file_path).await {
            self.discard_image(timestamp);
            return Err(e);
        }

        tracing::info!("Item {} registered ({})", timestamp, qr_file_path);
        Ok(CreatedItem { timestamp, qr_file_path })
    }

    async fn store_image_path(
        &self,
        mut tx: Transaction<'_, Sqlite>,
        timestamp: i64,
        qr_file_path: &str,
    ) -> Result<(), AppError> {
        self.item_repo.set_image_path(&mut *tx, timestamp, qr_file_path).await?;
        tx.commit().await?;
        Ok(())
    }

    // A renderização é bloqueante (CPU + disco): vai para o pool de blocking, com prazo.
    async fn render(&self, timestamp: i64, payload: String) -> Result<String, AppError> {
        let renderer = Arc::clone(&self.renderer);
        let mut task = tokio::task::spawn_blocking(move || renderer.render(timestamp, &payload));

        match tokio::time::timeout(self.render_timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(AppError::QrGeneration(join_err.to_string())),
            Err(_) => {
                // A thread segue rodando: o arquivo que ela gravar depois também sai
                let service = self.clone();
                tokio::spawn(async move {
                    if let Ok(Ok(_)) = task.await {
                        service.discard_image(timestamp);
                    }
                });
                Err(AppError::QrGeneration(format!(
                    "timed out after {}s",
                    self.render_timeout.as_secs_f32()
                )))
            }
        }
    }

    fn discard_image(&self, timestamp: i64) {
        if let Err(e) = self.renderer.discard(timestamp) {
            tracing::warn!("Could not remove QR image of item {}: {}", timestamp, e);
        }
    }

    pub async fn get_item(&self, timestamp: i64) -> Result<Item, AppError> {
        self.item_repo
            .find_by_timestamp(&self.pool, timestamp)
            .await?
            .ok_or(AppError::ItemNotFound(timestamp))
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        self.item_repo.list_items(&self.pool).await
    }

    pub async fn list_inspections_for_item(&self, timestamp: i64) -> Result<Vec<Inspection>, AppError> {
        self.inspection_repo.list_for_item(&self.pool, timestamp).await
    }

    pub async fn list_inspections(&self) -> Result<Vec<InspectionWithItem>, AppError> {
        self.inspection_repo.list_with_items(&self.pool).await
    }
}

// src/services/request_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{InspectionRepository, ItemRepository, RequestRepository, UserRepository},
    models::{
        auth::UserRole,
        inspection::NewInspection,
        request::{Decision, PendingRequest, RequestPayload, RequestStatus},
    },
};

/// Resultado de uma resolução: o novo status e, se houve, a inspeção criada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: RequestStatus,
    pub inspection_id: Option<i64>,
}

// Fluxo de aprovação: pending -> {approved, rejected}, sem volta.
#[derive(Clone)]
pub struct RequestService {
    request_repo: RequestRepository,
    item_repo: ItemRepository,
    user_repo: UserRepository,
    inspection_repo: InspectionRepository,
    pool: SqlitePool,
}

impl RequestService {
    pub fn new(
        request_repo: RequestRepository,
        item_repo: ItemRepository,
        user_repo: UserRepository,
        inspection_repo: InspectionRepository,
        pool: SqlitePool,
    ) -> Self {
        Self { request_repo, item_repo, user_repo, inspection_repo, pool }
    }

    pub async fn create_request(
        &self,
        qr_timestamp: i64,
        user_id: i64,
        request_type: &str,
        request_data: &str,
    ) -> Result<i64, AppError> {
        if request_type.trim().is_empty() || request_data.trim().is_empty() {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        }

        let mut tx = self.pool.begin().await?;

        // Integridade referencial antes do INSERT (a FK fica como rede de segurança)
        if self.item_repo.find_by_timestamp(&mut *tx, qr_timestamp).await?.is_none() {
            return Err(AppError::ItemNotFound(qr_timestamp));
        }
        if self.user_repo.find_by_id(&mut *tx, user_id).await?.is_none() {
            return Err(AppError::UserNotFound(user_id));
        }

        let request_id = self
            .request_repo
            .create_request(&mut *tx, qr_timestamp, user_id, request_type, request_data)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Request {} ({}) opened for item {} by user {}",
            request_id, request_type, qr_timestamp, user_id
        );
        Ok(request_id)
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingRequest>, AppError> {
        self.request_repo.list_pending(&self.pool).await
    }

    // --- RESOLVE ---
    // Atualização de status e criação da inspeção na mesma transação:
    // ou as duas entram, ou nenhuma.
    pub async fn resolve(
        &self,
        request_id: i64,
        admin_id: i64,
        decision: Decision,
    ) -> Result<Resolution, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Quem resolve precisa existir e ser admin
        let admin = self
            .user_repo
            .find_by_id(&mut *tx, admin_id)
            .await?
            .ok_or(AppError::UserNotFound(admin_id))?;
        if admin.role != UserRole::Admin {
            return Err(AppError::Forbidden(format!(
                "User '{}' cannot resolve requests",
                admin.username
            )));
        }

        // 2. O pedido precisa existir e ainda estar pendente
        let request = self
            .request_repo
            .find_by_id(&mut *tx, request_id)
            .await?
            .ok_or(AppError::RequestNotFound(request_id))?;
        if request.status != RequestStatus::Pending {
            return Err(AppError::InvalidState {
                id: request_id,
                status: request.status.as_str().to_string(),
            });
        }

        // 3. Decodifica o payload antes de qualquer escrita
        let payload = match decision {
            Decision::Approved => Some(RequestPayload::decode(&request.request_type, &request.request_data)?),
            Decision::Rejected => None,
        };

        // 4. Transição de estado (o WHERE status = 'pending' barra resoluções concorrentes)
        let status = RequestStatus::from(decision);
        let updated = self
            .request_repo
            .mark_resolved(&mut *tx, request_id, status, admin_id)
            .await?;
        if !updated {
            return Err(AppError::InvalidState {
                id: request_id,
                status: "resolved".to_string(),
            });
        }

        // 5. Aprovação de relatório de inspeção materializa a inspeção
        let inspection_id = match payload {
            Some(RequestPayload::InspectionReport(report)) => {
                let inspection = NewInspection {
                    qr_timestamp: request.qr_timestamp,
                    inspection_time: &report.inspection_time,
                    inspection_report: report.inspection_report.as_deref(),
                    need_replacement_repair: report.need_replacement_repair,
                    request_id,
                };
                Some(self.inspection_repo.create_inspection(&mut *tx, &inspection).await?)
            }
            Some(RequestPayload::Other(_)) | None => None,
        };

        tx.commit().await?;

        tracing::info!(
            "Request {} {} by admin {}{}",
            request_id,
            status.as_str(),
            admin_id,
            inspection_id.map(|id| format!(", inspection {} created", id)).unwrap_or_default()
        );
        Ok(Resolution { status, inspection_id })
    }
}

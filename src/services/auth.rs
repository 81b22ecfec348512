// src/services/auth.rs

use bcrypt::{hash, verify};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserRole, UserSummary},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    bcrypt_cost: u32,
    default_admin_username: String,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        bcrypt_cost: u32,
        default_admin_username: String,
        pool: SqlitePool,
    ) -> Self {
        Self { user_repo, bcrypt_cost, default_admin_username, pool }
    }

    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<i64, AppError> {
        let password_hash = self.hash_password(password).await?;
        let id = self
            .user_repo
            .create_user(&self.pool, username, &password_hash, role)
            .await?;

        tracing::info!("User '{}' registered with role {:?}", username, role);
        Ok(id)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<UserSummary, AppError> {
        let user = self
            .user_repo
            .find_by_username(&self.pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Cria a conta admin padrão se ainda não existir.
    pub async fn ensure_default_admin(&self, password: &str) -> Result<(), AppError> {
        let existing = self
            .user_repo
            .find_by_username(&self.pool, &self.default_admin_username)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        self.register_user(&self.default_admin_username, password, UserRole::Admin).await?;
        tracing::info!("Default admin account '{}' created", self.default_admin_username);
        Ok(())
    }

    // Sem sessão, pedidos e resoluções sem autor explícito caem nesta conta
    pub async fn default_admin(&self) -> Result<User, AppError> {
        self.user_repo
            .find_by_username(&self.pool, &self.default_admin_username)
            .await?
            .ok_or_else(|| anyhow::anyhow!("default admin '{}' is missing", self.default_admin_username).into())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_users(&self.pool).await
    }

    /// Admins nunca são removidos; devolve o número de linhas apagadas.
    pub async fn delete_user(&self, id: i64) -> Result<u64, AppError> {
        let removed = self.user_repo.delete_non_admin(&self.pool, id).await?;
        if removed == 0 {
            tracing::info!("Delete of user {} skipped (admin or unknown)", id);
        }
        Ok(removed)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;
        Ok(hashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::db_utils::test_utils::temp_pool;

    async fn service() -> (tempfile::TempDir, AuthService) {
        let (dir, pool) = temp_pool().await;
        // Custo mínimo do bcrypt para os testes não demorarem
        let svc = AuthService::new(UserRepository::new(), 4, "admin".into(), pool);
        (dir, svc)
    }

    #[tokio::test]
    async fn login_checks_the_hashed_password() {
        let (_dir, svc) = service().await;
        svc.register_user("maria", "s3cret", UserRole::User).await.unwrap();

        let user = svc.login_user("maria", "s3cret").await.unwrap();
        assert_eq!(user.username, "maria");
        assert_eq!(user.role, UserRole::User);

        assert!(matches!(svc.login_user("maria", "wrong").await, Err(AppError::InvalidCredentials)));
        assert!(matches!(svc.login_user("nobody", "s3cret").await, Err(AppError::InvalidCredentials)));

        // Nada de texto puro no banco
        let stored = svc.list_users().await.unwrap();
        assert_ne!(stored[0].password_hash, "s3cret");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (_dir, svc) = service().await;
        svc.register_user("maria", "a", UserRole::User).await.unwrap();
        let err = svc.register_user("maria", "b", UserRole::Admin).await.unwrap_err();
        assert!(matches!(err, AppError::UsernameAlreadyExists));
    }

    #[tokio::test]
    async fn default_admin_is_seeded_once() {
        let (_dir, svc) = service().await;
        svc.ensure_default_admin("admin123").await.unwrap();
        svc.ensure_default_admin("other").await.unwrap();

        let admin = svc.default_admin().await.unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
        assert!(svc.login_user("admin", "admin123").await.is_ok());
    }

    #[tokio::test]
    async fn deleting_admin_is_a_no_op_and_user_is_removed() {
        let (_dir, svc) = service().await;
        let admin = svc.register_user("root", "x", UserRole::Admin).await.unwrap();
        let user = svc.register_user("tech", "x", UserRole::User).await.unwrap();

        assert_eq!(svc.delete_user(admin).await.unwrap(), 0);
        assert_eq!(svc.delete_user(user).await.unwrap(), 1);

        let names: Vec<String> = svc.list_users().await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["root".to_string()]);
    }
}

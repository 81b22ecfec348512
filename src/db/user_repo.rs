// src/db/user_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::{
        db_utils::is_unique_violation,
        error::AppError,
    },
    models::auth::{User, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone, Default)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_username<'e, E>(
        &self,
        executor: E,
        username: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    // Cria um novo usuário; nome repetido vira UsernameAlreadyExists.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password_hash)
            .bind(role)
            .execute(executor)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::UsernameAlreadyExists;
                }
                e.into()
            })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_users<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(executor)
            .await?;
        Ok(users)
    }

    /// Remove o usuário, a menos que seja admin. Devolve quantas linhas saíram (0 ou 1).
    /// Os pedidos dele saem junto (ON DELETE CASCADE).
    pub async fn delete_non_admin<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ? AND role != 'admin'")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

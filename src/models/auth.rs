// src/models/auth.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: UserRole,
    pub created_at: NaiveDateTime,
}

// O que o login devolve: sem senha e sem datas
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self { id: user.id, username: user.username, role: user.role }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(
        required(message = "Missing credentials"),
        length(min = 1, message = "Missing credentials")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Missing credentials"),
        length(min = 1, message = "Missing credentials")
    )]
    pub password: Option<String>,
    // Padrão: 'user'
    pub role: Option<UserRole>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(
        required(message = "Missing credentials"),
        length(min = 1, message = "Missing credentials")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Missing credentials"),
        length(min = 1, message = "Missing credentials")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserSummary,
}

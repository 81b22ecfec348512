// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use sqlx::SqlitePool;

use crate::{
    common::db_utils::connect_pool,
    db::{InspectionRepository, ItemRepository, RequestRepository, UserRepository},
    services::{
        auth::AuthService,
        dashboard_service::DashboardService,
        item_service::ItemService,
        qr_renderer::{PngQrRenderer, QrRenderer},
        request_service::RequestService,
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub qr_codes_dir: PathBuf,
    pub qr_render_timeout: Duration,
    pub bcrypt_cost: u32,
    pub default_admin_username: String,
    pub default_admin_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let qr_render_timeout_secs: u64 = env_or("QR_RENDER_TIMEOUT_SECS", "10").parse()?;
        let bcrypt_cost: u32 = env_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string()).parse()?;

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://qrix.db"),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:5000"),
            qr_codes_dir: PathBuf::from(env_or("QR_CODES_DIR", "static/qr_codes")),
            qr_render_timeout: Duration::from_secs(qr_render_timeout_secs),
            bcrypt_cost,
            default_admin_username: env_or("DEFAULT_ADMIN_USERNAME", "admin"),
            default_admin_password: env_or("DEFAULT_ADMIN_PASSWORD", "admin123"),
        })
    }

    /// O cadastro segura o lock de escrita enquanto renderiza o QR Code:
    /// quem espera por ele precisa aguentar a renderização inteira.
    pub fn busy_timeout(&self) -> Duration {
        self.qr_render_timeout + BUSY_TIMEOUT_MARGIN
    }
}

const BUSY_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub item_service: ItemService,
    pub request_service: RequestService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let renderer = PngQrRenderer::new(&config.qr_codes_dir, "static/qr_codes");
        Self::with_renderer(config, Arc::new(renderer)).await
    }

    /// Igual a `new`, mas com o gerador de imagens injetado.
    pub async fn with_renderer(config: &Config, renderer: Arc<dyn QrRenderer>) -> anyhow::Result<Self> {
        // Conecta ao banco e roda as migrações, usando '?' para propagar erros
        let db_pool = connect_pool(&config.database_url, 5, config.busy_timeout()).await?;
        tracing::info!("Database ready at {}", config.database_url);

        // --- Monta o gráfico de dependências ---
        let item_repo = ItemRepository::new();
        let user_repo = UserRepository::new();
        let request_repo = RequestRepository::new();
        let inspection_repo = InspectionRepository::new();

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.bcrypt_cost,
            config.default_admin_username.clone(),
            db_pool.clone(),
        );
        let item_service = ItemService::new(
            item_repo.clone(),
            inspection_repo.clone(),
            renderer,
            config.qr_render_timeout,
            db_pool.clone(),
        );
        let request_service = RequestService::new(
            request_repo,
            item_repo.clone(),
            user_repo,
            inspection_repo.clone(),
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(item_repo, inspection_repo, db_pool.clone());

        auth_service.ensure_default_admin(&config.default_admin_password).await?;

        Ok(Self {
            db_pool,
            auth_service,
            item_service,
            request_service,
            dashboard_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(render_secs: u64) -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            bind_addr: "127.0.0.1:0".into(),
            qr_codes_dir: PathBuf::from("qr_codes"),
            qr_render_timeout: Duration::from_secs(render_secs),
            bcrypt_cost: 4,
            default_admin_username: "admin".into(),
            default_admin_password: "admin123".into(),
        }
    }

    #[test]
    fn writers_outwait_the_slowest_render() {
        for secs in [0, 10, 60] {
            let config = config(secs);
            assert!(config.busy_timeout() > config.qr_render_timeout);
        }
        assert_eq!(config(10).busy_timeout(), Duration::from_secs(15));
    }
}

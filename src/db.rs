use std::time::Duration;

use sqlx::{AnyPool, Pool};
use tracing::info;

use crate::error::CustomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, CustomError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            Err(CustomError::UnsupportedDatabase(scheme.to_string()))
        }
    }

    fn schema(&self) -> [&'static str; 3] {
        match self {
            Backend::Postgres => [
                r#"
                CREATE TABLE IF NOT EXISTS portfolios (
                    id BIGSERIAL PRIMARY KEY,
                    user_id VARCHAR(64) NOT NULL UNIQUE
                )"#,
                r#"
                CREATE TABLE IF NOT EXISTS holdings (
                    id BIGSERIAL PRIMARY KEY,
                    portfolio_id BIGINT NOT NULL REFERENCES portfolios(id) ON DELETE CASCADE,
                    coin_id VARCHAR(64) NOT NULL,
                    amount DOUBLE PRECISION NOT NULL,
                    UNIQUE (portfolio_id, coin_id)
                )"#,
                "CREATE INDEX IF NOT EXISTS ix_holdings_portfolio_id ON holdings (portfolio_id)",
            ],
            Backend::Sqlite => [
                r#"
                CREATE TABLE IF NOT EXISTS portfolios (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id TEXT NOT NULL UNIQUE
                )"#,
                r#"
                CREATE TABLE IF NOT EXISTS holdings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    portfolio_id INTEGER NOT NULL REFERENCES portfolios(id) ON DELETE CASCADE,
                    coin_id TEXT NOT NULL,
                    amount REAL NOT NULL,
                    UNIQUE (portfolio_id, coin_id)
                )"#,
                "CREATE INDEX IF NOT EXISTS ix_holdings_portfolio_id ON holdings (portfolio_id)",
            ],
        }
    }
}

pub struct Database {
    pub pool: Pool<sqlx::Any>,
    pub backend: Backend,
}

impl Database {
    pub async fn connect(url: &str) -> Result<Self, CustomError> {
        let backend = Backend::from_url(url)?;
        let pool = Self::new_pool(url).await?;
        Ok(Database { pool, backend })
    }

    pub async fn new_pool(url: &str) -> Result<Pool<sqlx::Any>, CustomError> {
        sqlx::any::install_default_drivers();
        sqlx::any::AnyPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(CustomError::DBError)
    }

    pub async fn migrate(&self) -> Result<(), CustomError> {
        migrate(&self.pool, self.backend).await
    }
}

/// Creates the `portfolios` and `holdings` tables when they are missing.
pub async fn migrate(pool: &AnyPool, backend: Backend) -> Result<(), CustomError> {
    for statement in backend.schema() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(CustomError::MigrationError)?;
    }
    info!(?backend, "schema is up to date");
    Ok(())
}

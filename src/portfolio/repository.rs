use crate::error::CustomError;

use super::model::{Holding, Portfolio};

pub struct PortfolioRepository {
    pool: sqlx::AnyPool,
}

impl PortfolioRepository {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        PortfolioRepository { pool }
    }

    pub async fn find_portfolio(&self, user_id: &str) -> Result<Option<Portfolio>, CustomError> {
        sqlx::query_as::<_, Portfolio>(
            r#"
            SELECT id, user_id
            FROM portfolios
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }

    /// Returns the user's portfolio, creating it in the same statement if needed.
    pub async fn upsert_portfolio(&self, user_id: &str) -> Result<Portfolio, CustomError> {
        sqlx::query_as::<_, Portfolio>(
            r#"
            INSERT INTO portfolios (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = excluded.user_id
            RETURNING id, user_id"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }

    pub async fn holdings_for_user(&self, user_id: &str) -> Result<Vec<Holding>, CustomError> {
        sqlx::query_as::<_, Holding>(
            r#"
            SELECT h.id, h.portfolio_id, h.coin_id, h.amount
            FROM holdings h
            JOIN portfolios p ON p.id = h.portfolio_id
            WHERE p.user_id = $1
            ORDER BY h.coin_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }

    /// Inserts the holding or adds `amount` to the existing row.
    pub async fn accumulate_holding(
        &self,
        portfolio_id: i64,
        coin_id: &str,
        amount: f64,
    ) -> Result<Holding, CustomError> {
        sqlx::query_as::<_, Holding>(
            r#"
            INSERT INTO holdings (portfolio_id, coin_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (portfolio_id, coin_id) DO UPDATE SET amount = holdings.amount + excluded.amount
            RETURNING id, portfolio_id, coin_id, amount"#,
        )
        .bind(portfolio_id)
        .bind(coin_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }

    pub async fn delete_holding(&self, portfolio_id: i64, coin_id: &str) -> Result<bool, CustomError> {
        let result = sqlx::query(
            r#"
            DELETE FROM holdings
            WHERE portfolio_id = $1 AND coin_id = $2"#,
        )
        .bind(portfolio_id)
        .bind(coin_id)
        .execute(&self.pool)
        .await
        .map_err(CustomError::DBError)?;

        Ok(result.rows_affected() > 0)
    }
}

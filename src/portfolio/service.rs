use tracing::{debug, info};

use super::{
    model::{Holding, Portfolio},
    repository::PortfolioRepository,
};
use crate::error::CustomError;

pub struct PortfolioService {
    repository: PortfolioRepository,
}

impl PortfolioService {
    pub fn new(repository: PortfolioRepository) -> Self {
        PortfolioService { repository }
    }

    pub async fn get_portfolio(&self, user_id: &str) -> Result<Option<Portfolio>, CustomError> {
        self.repository.find_portfolio(user_id).await
    }

    pub async fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>, CustomError> {
        self.repository.holdings_for_user(user_id).await
    }

    /// Plain sum of raw amounts; no price weighting.
    pub async fn get_total_net_holding(&self, user_id: &str) -> Result<f64, CustomError> {
        let holdings = self.list_holdings(user_id).await?;
        Ok(holdings.iter().map(|h| h.amount).sum())
    }

    pub async fn add_holding(
        &self,
        user_id: &str,
        coin_id: &str,
        amount: f64,
    ) -> Result<Holding, CustomError> {
        let portfolio = self.repository.upsert_portfolio(user_id).await?;
        let holding = self
            .repository
            .accumulate_holding(portfolio.id, coin_id, amount)
            .await?;
        info!(
            "{} added {} {} (now {})",
            user_id, amount, coin_id, holding.amount
        );
        Ok(holding)
    }

    pub async fn remove_holding(&self, user_id: &str, coin_id: &str) -> Result<bool, CustomError> {
        let Some(portfolio) = self.repository.find_portfolio(user_id).await? else {
            debug!("{} has no portfolio", user_id);
            return Ok(false);
        };
        let removed = self.repository.delete_holding(portfolio.id, coin_id).await?;
        if removed {
            info!("{} removed {}", user_id, coin_id);
        }
        Ok(removed)
    }
}

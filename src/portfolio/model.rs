use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Portfolio {
    pub id: i64,
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Holding {
    pub id: i64,
    pub portfolio_id: i64,
    pub coin_id: String,
    pub amount: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct AddHoldingRequest {
    pub coin_id: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RemoveHoldingRequest {
    pub coin_id: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct TotalResponse {
    pub status: &'static str,
    pub user_id: String,
    pub total_net_holding: f64,
}

#[derive(Serialize, Debug)]
pub struct HoldingView {
    pub coin_id: String,
    pub amount: f64,
}

impl From<Holding> for HoldingView {
    fn from(holding: Holding) -> Self {
        HoldingView {
            coin_id: holding.coin_id,
            amount: holding.amount,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HoldingResponse {
    pub status: &'static str,
    pub holding: HoldingView,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

use serde::{Deserialize, Serialize};
use crate::types::token::Token;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub token: Token,
    #[serde(rename = "balance")]
    pub raw_balance: String,
    pub formatted_balance: String,
    pub usd_value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub usd_value: f64,
    pub token_count: usize,
}

/// One fetch worth of balances for a single address on a single chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub balances: Vec<WalletBalance>,
    pub totals: PortfolioTotals,
}

impl Portfolio {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PaginationMetadata {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

/// Body of `GET /api/balance`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BalanceResponse {
    pub data: Vec<WalletBalance>,
    pub totals: PortfolioTotals,
    pub cached: bool,
}

/// Body of `GET /api/portfolio/{address}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPageResponse {
    pub tokens: Vec<WalletBalance>,
    pub pagination: PaginationMetadata,
    pub total_usd_value: f64,
    pub total_token_count: usize,
    pub cached: bool,
}

use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::services::chains::{self, DEFAULT_CHAIN};
use crate::services::portfolio_view::{self, PortfolioQuery};
use crate::types::portfolio::{BalanceResponse, PortfolioPageResponse};

pub async fn health_check() -> Json<HashMap<&'static str, &'static str>> {
    let mut response = HashMap::new();
    response.insert("status", "ok");
    response.insert("service", "wallet-portfolio-api");
    Json(response)
}

pub async fn list_chains() -> Json<Value> {
    Json(json!({ "chains": chains::chain_listing() }))
}

#[derive(Debug, Deserialize)]
pub struct BalanceParams {
    pub address: Option<String>,
    pub chain: Option<String>,
}

pub async fn get_balance(
    State(state): State<AppState>,
    params: Result<Query<BalanceParams>, QueryRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Query(params) = params?;
    let address = params
        .address
        .filter(|a| !a.is_empty())
        .ok_or(ApiError::MissingAddress)?;
    let chain = params.chain.unwrap_or_else(|| DEFAULT_CHAIN.slug.to_string());

    info!("📥 Balance request for {} on {}", address, chain);
    let lookup = state.balances.lookup(&address, &chain).await?;

    Ok(Json(BalanceResponse {
        data: lookup.balances,
        totals: lookup.totals,
        cached: lookup.cached,
    }))
}

/// Chain selection for the portfolio view. Paging and sorting come from
/// [`PortfolioQuery`], read from the same query string.
#[derive(Debug, Deserialize)]
pub struct ChainParams {
    pub chain: Option<String>,
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(address): Path<String>,
    chain: Result<Query<ChainParams>, QueryRejection>,
    query: Result<Query<PortfolioQuery>, QueryRejection>,
) -> Result<Json<PortfolioPageResponse>, ApiError> {
    let Query(ChainParams { chain }) = chain?;
    let Query(query) = query?;
    let chain = chain.unwrap_or_else(|| DEFAULT_CHAIN.slug.to_string());

    info!("📥 Portfolio request for {} on {}", address, chain);
    let lookup = state.balances.lookup(&address, &chain).await?;

    let page = portfolio_view::apply(&lookup.balances, &query);

    Ok(Json(PortfolioPageResponse {
        tokens: page.items,
        pagination: page.pagination,
        total_usd_value: lookup.totals.usd_value,
        total_token_count: lookup.totals.token_count,
        cached: lookup.cached,
    }))
}

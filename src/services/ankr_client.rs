use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::services::aggregator::aggregate;
use crate::services::chains::{self, Chain};
use crate::services::error::FetchError;
use crate::services::resolver::is_valid_address;
use crate::types::portfolio::{Portfolio, WalletBalance};
use crate::types::token::{Token, TokenPrice};

const GET_ACCOUNT_BALANCE: &str = "ankr_getAccountBalance";

/// Values substituted when the provider leaves a field out.
///
/// | field         | default                        |
/// |---------------|--------------------------------|
/// | address       | zero address (native asset)    |
/// | symbol        | native symbol of the chain     |
/// | name          | `Unknown`                      |
/// | decimals      | 18                             |
/// | logoURI       | none                           |
/// | price.USD     | null                           |
/// | usdValue      | 0                              |
pub mod defaults {
    pub const ADDRESS: &str = "0x0000000000000000000000000000000000000000";
    pub const NAME: &str = "Unknown";
    pub const DECIMALS: u8 = 18;
    pub const USD_VALUE: f64 = 0.0;
}

/// Source of wallet balances for one address on one chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    async fn fetch_balances(&self, address: &str, chain_id: u64) -> Result<Portfolio, FetchError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountBalanceParams<'a> {
    blockchain: &'a str,
    wallet_address: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: AccountBalanceParams<'a>,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<AccountBalanceResult>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceResult {
    #[serde(default)]
    pub assets: Option<Vec<AnkrAsset>>,
}

/// One asset record as returned by `ankr_getAccountBalance`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnkrAsset {
    #[serde(default)]
    pub blockchain: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub token_decimals: Option<u32>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub balance: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub balance_usd: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a decimal string; missing or non-numeric input is zero.
pub fn parse_amount(value: Option<&str>) -> f64 {
    parse_finite(value).unwrap_or(defaults::USD_VALUE)
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    non_empty(value)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Renders a balance with exactly `decimals` fractional digits, `"0"` if unparseable.
pub fn format_balance(balance: &str, decimals: u8) -> String {
    match parse_finite(Some(balance)) {
        Some(amount) => format!("{:.*}", decimals as usize, amount),
        None => "0".to_string(),
    }
}

/// Maps one upstream asset onto the internal token/balance shape.
pub fn normalize_asset(asset: &AnkrAsset, fallback_chain: Chain) -> WalletBalance {
    let chain = match non_empty(asset.blockchain.as_deref()) {
        Some(slug) => chains::chain_by_slug(slug),
        None => fallback_chain,
    };

    let decimals = asset
        .token_decimals
        .and_then(|d| u8::try_from(d).ok())
        .unwrap_or(defaults::DECIMALS);

    let token = Token {
        address: non_empty(asset.contract_address.as_deref())
            .unwrap_or(defaults::ADDRESS)
            .to_string(),
        symbol: non_empty(asset.token_symbol.as_deref())
            .unwrap_or(chain.native_symbol)
            .to_string(),
        name: non_empty(asset.token_name.as_deref())
            .unwrap_or(defaults::NAME)
            .to_string(),
        decimals,
        logo_uri: non_empty(asset.thumbnail.as_deref()).map(str::to_string),
        chain_id: chain.id,
        price: TokenPrice {
            usd: parse_finite(asset.token_price.as_deref()),
        },
        token_type: non_empty(asset.token_type.as_deref()).map(str::to_lowercase),
    };

    let raw_balance = non_empty(asset.balance.as_deref()).unwrap_or("0").to_string();

    WalletBalance {
        formatted_balance: format_balance(&raw_balance, decimals),
        raw_balance,
        usd_value: parse_amount(asset.balance_usd.as_deref()),
        token,
    }
}

/// Decodes a provider response body into its asset list.
pub fn parse_account_balance(body: &[u8]) -> Result<Vec<AnkrAsset>, FetchError> {
    let response: JsonRpcResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(FetchError::Upstream {
            code: error.code,
            message: error.message,
        });
    }

    Ok(response
        .result
        .and_then(|result| result.assets)
        .unwrap_or_default())
}

/// Normalizes assets for `chain`, dropping records that belong to other chains.
pub fn build_portfolio(assets: &[AnkrAsset], chain: Chain) -> Portfolio {
    let balances: Vec<WalletBalance> = assets
        .iter()
        .map(|asset| normalize_asset(asset, chain))
        .filter(|balance| balance.token.chain_id == chain.id)
        .collect();
    let totals = aggregate(&balances);

    Portfolio { balances, totals }
}

/// Client for Ankr's multichain advanced API.
#[derive(Clone)]
pub struct AnkrClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl AnkrClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.ankr_api_endpoint.clone(),
            api_key: config.ankr_api_key.clone(),
        })
    }
}

#[async_trait]
impl BalanceProvider for AnkrClient {
    async fn fetch_balances(&self, address: &str, chain_id: u64) -> Result<Portfolio, FetchError> {
        if !is_valid_address(address) {
            warn!("Invalid EVM address format, skipping Ankr API request");
            return Ok(Portfolio::empty());
        }

        let chain = chains::chain_by_id(chain_id);
        info!("🔍 Fetching {} balances for {}", chain.slug, address);

        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            method: GET_ACCOUNT_BALANCE,
            params: AccountBalanceParams {
                blockchain: chain.slug,
                wallet_address: address,
            },
            id: 1,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let assets = parse_account_balance(&bytes)?;
        debug!("📦 Ankr returned {} assets for {}", assets.len(), address);

        let portfolio = build_portfolio(&assets, chain);
        info!(
            "💰 {} tokens worth ${:.2} on {}",
            portfolio.totals.token_count, portfolio.totals.usd_value, chain.slug
        );

        Ok(portfolio)
    }
}

use serde::{Deserialize, Serialize};

/// USD quote attached to a token, `null` when the provider has no price.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TokenPrice {
    #[serde(rename = "USD")]
    pub usd: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none", rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub chain_id: u64,
    pub price: TokenPrice,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub token_type: Option<String>,
}

// Configuration loading and settings
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_ANKR_ENDPOINT: &str = "https://rpc.ankr.com/multichain";
const DEFAULT_ETHEREUM_RPC_URL: &str = "https://eth.llamarpc.com";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ankr_api_key: Option<String>,
    pub ankr_api_endpoint: String,
    pub ethereum_rpc_url: String,
    pub cache_ttl: Duration,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let ankr_api_key = env::var("ANKR_API_KEY").ok().filter(|key| !key.is_empty());
        let ankr_api_endpoint = env::var("ANKR_API_ENDPOINT")
            .unwrap_or_else(|_| default_ankr_endpoint(ankr_api_key.as_deref()));

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8080),
            ankr_api_key,
            ankr_api_endpoint,
            ethereum_rpc_url: env::var("ETHEREUM_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_ETHEREUM_RPC_URL.to_string()),
            cache_ttl: Duration::from_secs(parse_or(
                "CACHE_TTL_SECONDS",
                DEFAULT_CACHE_TTL_SECONDS,
            )),
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECONDS",
                DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
            )),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            ankr_api_key: None,
            ankr_api_endpoint: DEFAULT_ANKR_ENDPOINT.to_string(),
            ethereum_rpc_url: DEFAULT_ETHEREUM_RPC_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECONDS),
        }
    }
}

/// Ankr accepts the key either as a path segment or as `x-api-key`; the path form is the default.
fn default_ankr_endpoint(api_key: Option<&str>) -> String {
    match api_key {
        Some(key) => format!("{}/{}", DEFAULT_ANKR_ENDPOINT, key),
        None => DEFAULT_ANKR_ENDPOINT.to_string(),
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

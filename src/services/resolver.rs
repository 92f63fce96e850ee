use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::services::error::BalanceError;

static EVM_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern compiles"));

pub fn is_valid_address(input: &str) -> bool {
    EVM_ADDRESS.is_match(input)
}

pub fn is_ens_name(input: &str) -> bool {
    input.ends_with(".eth")
}

/// Name-service lookup. `Ok(None)` means the name has no address record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> anyhow::Result<Option<String>>;
}

/// ENS lookups over a plain Ethereum mainnet JSON-RPC endpoint.
#[derive(Clone)]
pub struct EnsResolver {
    provider: Provider<Http>,
}

impl EnsResolver {
    pub fn new(rpc_url: &str) -> anyhow::Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)?;
        Ok(Self { provider })
    }
}

#[async_trait]
impl NameResolver for EnsResolver {
    async fn resolve(&self, name: &str) -> anyhow::Result<Option<String>> {
        debug!("🔎 Resolving ENS name {}", name);
        let address = self.provider.resolve_name(name).await?;
        if address.is_zero() {
            return Ok(None);
        }
        Ok(Some(format!("{:#x}", address)))
    }
}

/// Turns user input (hex address or ENS name) into a lowercase hex address.
pub async fn resolve_address<R>(resolver: &R, input: &str) -> Result<String, BalanceError>
where
    R: NameResolver + ?Sized,
{
    if is_ens_name(input) {
        let resolved = match resolver.resolve(input).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("⚠️ ENS lookup for {} failed: {:?}", input, e);
                None
            }
        };

        return match resolved {
            Some(address) if is_valid_address(&address) => {
                info!("✅ Resolved {} to {}", input, address);
                Ok(address.to_lowercase())
            }
            Some(address) => {
                warn!("⚠️ ENS name {} resolved to malformed address {:?}", input, address);
                Err(BalanceError::Resolution(
                    "Invalid ENS name or unable to resolve".to_string(),
                ))
            }
            None => Err(BalanceError::Resolution(
                "Invalid ENS name or unable to resolve".to_string(),
            )),
        };
    }

    if !is_valid_address(input) {
        warn!("⚠️ Rejecting malformed address {:?}", input);
        return Err(BalanceError::Validation(
            "Please enter a valid Ethereum address or ENS name".to_string(),
        ));
    }

    Ok(input.to_lowercase())
}

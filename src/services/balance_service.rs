use std::sync::Arc;

use tracing::{debug, error, info};

use crate::services::ankr_client::BalanceProvider;
use crate::services::cache::BalanceCache;
use crate::services::chains;
use crate::services::error::BalanceError;
use crate::services::resolver::{resolve_address, NameResolver};
use crate::types::portfolio::{PortfolioTotals, WalletBalance};

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceLookup {
    pub address: String,
    pub chain_slug: &'static str,
    pub balances: Vec<WalletBalance>,
    pub totals: PortfolioTotals,
    pub cached: bool,
}

/// Resolve, consult the cache, fetch on miss, store.
#[derive(Clone)]
pub struct BalanceService {
    provider: Arc<dyn BalanceProvider>,
    resolver: Arc<dyn NameResolver>,
    cache: BalanceCache,
}

impl BalanceService {
    pub fn new(
        provider: Arc<dyn BalanceProvider>,
        resolver: Arc<dyn NameResolver>,
        cache: BalanceCache,
    ) -> Self {
        Self {
            provider,
            resolver,
            cache,
        }
    }

    pub fn cache(&self) -> &BalanceCache {
        &self.cache
    }

    pub async fn lookup(
        &self,
        input: &str,
        chain_slug: &str,
    ) -> Result<BalanceLookup, BalanceError> {
        let address = resolve_address(self.resolver.as_ref(), input).await?;
        let chain = chains::chain_by_slug(chain_slug);

        if let Some(entry) = self.cache.get(&address, chain.slug).await {
            debug!("Cache hit for {}, returning cached data", entry.key);
            return Ok(BalanceLookup {
                address,
                chain_slug: chain.slug,
                balances: entry.balances,
                totals: entry.totals,
                cached: true,
            });
        }

        debug!("Cache miss for {}:{}, fetching fresh data", address, chain.slug);

        let portfolio = self
            .provider
            .fetch_balances(&address, chain.id)
            .await
            .map_err(|e| {
                error!("❌ Error fetching balances for {} on {}: {:?}", address, chain.slug, e);
                e
            })?;

        // Providers hand back totals computed over exactly these balances.
        let totals = portfolio.totals;
        self.cache
            .put(&address, chain.slug, portfolio.balances.clone(), totals)
            .await;

        info!(
            "✅ {} tokens (${:.2}) for {} on {}",
            totals.token_count, totals.usd_value, address, chain.slug
        );

        Ok(BalanceLookup {
            address,
            chain_slug: chain.slug,
            balances: portfolio.balances,
            totals,
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator::aggregate;
    use crate::services::ankr_client::MockBalanceProvider;
    use crate::services::cache::ManualClock;
    use crate::services::error::FetchError;
    use crate::services::resolver::MockNameResolver;
    use crate::types::portfolio::Portfolio;
    use crate::types::token::{Token, TokenPrice};
    use mockall::predicate::eq;
    use std::time::Duration;

    const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn balance(symbol: &str, usd_value: f64) -> WalletBalance {
        WalletBalance {
            token: Token {
                address: "0x0000000000000000000000000000000000000000".to_string(),
                symbol: symbol.to_string(),
                name: symbol.to_string(),
                decimals: 18,
                logo_uri: None,
                chain_id: 1,
                price: TokenPrice::default(),
                token_type: None,
            },
            raw_balance: "1".to_string(),
            formatted_balance: "1.000000000000000000".to_string(),
            usd_value,
        }
    }

    fn two_assets() -> Portfolio {
        let balances = vec![balance("ETH", 100.50), balance("USDC", 49.50)];
        let totals = aggregate(&balances);
        Portfolio { balances, totals }
    }

    fn service_with(
        provider: MockBalanceProvider,
        resolver: MockNameResolver,
    ) -> (BalanceService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let cache = BalanceCache::with_clock(Duration::from_secs(60), clock.clone());
        (
            BalanceService::new(Arc::new(provider), Arc::new(resolver), cache),
            clock,
        )
    }

    #[tokio::test]
    async fn fetches_then_serves_from_cache() {
        let mut provider = MockBalanceProvider::new();
        provider
            .expect_fetch_balances()
            .with(eq(VITALIK.to_lowercase()), eq(1u64))
            .times(1)
            .returning(|_, _| Ok(two_assets()));
        let (service, _clock) = service_with(provider, MockNameResolver::new());

        let first = service.lookup(VITALIK, "eth").await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.totals.token_count, 2);
        assert!((first.totals.usd_value - 150.0).abs() < 1e-9);

        let shouted = VITALIK.to_uppercase().replace("0X", "0x");
        let second = service.lookup(&shouted, "ETH").await.unwrap();
        assert!(second.cached);
        assert_eq!(second.balances, first.balances);
        assert_eq!(second.totals, first.totals);
    }

    #[tokio::test]
    async fn expired_entry_triggers_a_new_fetch() {
        let mut provider = MockBalanceProvider::new();
        provider
            .expect_fetch_balances()
            .times(2)
            .returning(|_, _| Ok(two_assets()));
        let (service, clock) = service_with(provider, MockNameResolver::new());

        service.lookup(VITALIK, "eth").await.unwrap();
        clock.advance(Duration::from_millis(60_001));
        let again = service.lookup(VITALIK, "eth").await.unwrap();
        assert!(!again.cached);
    }

    #[tokio::test]
    async fn invalid_address_fails_before_upstream() {
        let mut provider = MockBalanceProvider::new();
        provider.expect_fetch_balances().times(0);
        let (service, _clock) = service_with(provider, MockNameResolver::new());

        let err = service.lookup("notanaddress", "eth").await.unwrap_err();
        assert!(matches!(err, BalanceError::Validation(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn unresolvable_ens_fails_before_upstream() {
        let mut provider = MockBalanceProvider::new();
        provider.expect_fetch_balances().times(0);
        let mut resolver = MockNameResolver::new();
        resolver.expect_resolve().returning(|_| Ok(None));
        let (service, _clock) = service_with(provider, resolver);

        let err = service.lookup("ghost.eth", "eth").await.unwrap_err();
        assert!(matches!(err, BalanceError::Resolution(_)));
    }

    #[tokio::test]
    async fn ens_names_are_cached_under_the_resolved_address() {
        let mut provider = MockBalanceProvider::new();
        provider
            .expect_fetch_balances()
            .times(1)
            .returning(|_, _| Ok(two_assets()));
        let mut resolver = MockNameResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(Some(VITALIK.to_string())));
        let (service, _clock) = service_with(provider, resolver);

        let by_name = service.lookup("vitalik.eth", "eth").await.unwrap();
        assert_eq!(by_name.address, VITALIK.to_lowercase());

        let by_address = service.lookup(VITALIK, "eth").await.unwrap();
        assert!(by_address.cached);
    }

    #[tokio::test]
    async fn unknown_chain_slug_uses_the_primary_chain() {
        let mut provider = MockBalanceProvider::new();
        provider
            .expect_fetch_balances()
            .with(eq(VITALIK.to_lowercase()), eq(chains::ETHEREUM))
            .times(1)
            .returning(|_, _| Ok(Portfolio::empty()));
        let (service, _clock) = service_with(provider, MockNameResolver::new());

        let lookup = service.lookup(VITALIK, "dogechain").await.unwrap();
        assert_eq!(lookup.chain_slug, "eth");
        assert_eq!(lookup.totals, PortfolioTotals { usd_value: 0.0, token_count: 0 });
    }

    #[tokio::test]
    async fn provider_totals_are_returned_and_cached_as_given() {
        let mut provider = MockBalanceProvider::new();
        provider.expect_fetch_balances().times(1).returning(|_, _| {
            Ok(Portfolio {
                balances: vec![balance("ETH", 10.0)],
                totals: PortfolioTotals {
                    usd_value: 10.0,
                    token_count: 1,
                },
            })
        });
        let (service, _clock) = service_with(provider, MockNameResolver::new());

        let fresh = service.lookup(VITALIK, "eth").await.unwrap();
        let cached = service.lookup(VITALIK, "eth").await.unwrap();
        assert!(cached.cached);
        assert_eq!(fresh.totals, cached.totals);
        assert_eq!(cached.totals, aggregate(&cached.balances));
    }

    #[tokio::test]
    async fn fetch_failures_propagate_and_are_not_cached() {
        let mut provider = MockBalanceProvider::new();
        let mut calls = 0;
        provider.expect_fetch_balances().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(FetchError::Status(502))
            } else {
                Ok(two_assets())
            }
        });
        let (service, _clock) = service_with(provider, MockNameResolver::new());

        let err = service.lookup(VITALIK, "eth").await.unwrap_err();
        assert!(matches!(err, BalanceError::Fetch(FetchError::Status(502))));
        assert!(!err.is_client_error());
        assert!(service.cache().is_empty().await);

        let retry = service.lookup(VITALIK, "eth").await.unwrap();
        assert!(!retry.cached);
    }
}

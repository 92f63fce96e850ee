// src/main.rs
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wallet_portfolio_api::{
    api::{self, AppState},
    config::Config,
    services::{AnkrClient, BalanceCache, BalanceService, EnsResolver},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Starting wallet portfolio API v{}", wallet_portfolio_api::VERSION);

    // Load configuration
    let config = Config::from_env()?;
    if config.ankr_api_key.is_none() {
        warn!("⚠️  ANKR_API_KEY not set, using the public multichain endpoint");
    }

    // Initialize services
    let provider = AnkrClient::new(&config)?;
    let resolver = EnsResolver::new(&config.ethereum_rpc_url)?;
    let cache = BalanceCache::new(config.cache_ttl);
    let balances = BalanceService::new(Arc::new(provider), Arc::new(resolver), cache.clone());

    let purge_every = config.cache_ttl.max(std::time::Duration::from_secs(1)) * 5;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purge_every);
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired().await;
            if removed > 0 {
                tracing::debug!("🧹 Purged {} expired cache entries", removed);
            }
        }
    });

    let app = api::router(AppState { balances });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 HTTP server listening on: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down gracefully...");
        })
        .await?;

    Ok(())
}

//! Wallet portfolio API
//!
//! Resolves an address or ENS name, fetches token balances for one EVM chain
//! from Ankr's multichain API, caches them briefly and serves them over HTTP.

pub mod api;
pub mod config;
pub mod services;
pub mod types;

pub use config::Config;
pub use services::{BalanceError, BalanceService, FetchError};
pub use types::{PortfolioTotals, Token, WalletBalance};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

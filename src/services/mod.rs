pub mod aggregator;
pub mod ankr_client;
pub mod balance_service;
pub mod cache;
pub mod chains;
pub mod error;
pub mod portfolio_view;
pub mod resolver;

pub use ankr_client::{AnkrClient, BalanceProvider};
pub use balance_service::{BalanceLookup, BalanceService};
pub use cache::BalanceCache;
pub use error::{BalanceError, FetchError};
pub use resolver::{EnsResolver, NameResolver};

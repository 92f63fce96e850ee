pub mod portfolio;
pub mod token;

pub use portfolio::{
    BalanceResponse, PaginationMetadata, Portfolio, PortfolioPageResponse, PortfolioTotals,
    WalletBalance,
};
pub use token::{Token, TokenPrice};

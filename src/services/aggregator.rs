use crate::types::portfolio::{PortfolioTotals, WalletBalance};

/// Sums USD value and counts tokens. Non-finite values count as zero.
pub fn aggregate(balances: &[WalletBalance]) -> PortfolioTotals {
    let usd_value = balances
        .iter()
        .map(|balance| balance.usd_value)
        .filter(|value| value.is_finite())
        .sum();

    PortfolioTotals {
        usd_value,
        token_count: balances.len(),
    }
}

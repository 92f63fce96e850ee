// Filtering, sorting and paging over an already-fetched balance list
use std::cmp::Ordering;

use serde::Deserialize;

use crate::types::portfolio::{PaginationMetadata, WalletBalance};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Balance,
    #[default]
    Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PortfolioPage {
    pub items: Vec<WalletBalance>,
    pub pagination: PaginationMetadata,
}

fn compare(a: &WalletBalance, b: &WalletBalance, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.token.name.to_lowercase().cmp(&b.token.name.to_lowercase()),
        SortField::Balance => {
            numeric(&a.formatted_balance).total_cmp(&numeric(&b.formatted_balance))
        }
        SortField::Value => finite_or_zero(a.usd_value).total_cmp(&finite_or_zero(b.usd_value)),
    }
}

fn numeric(value: &str) -> f64 {
    value.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Keeps balances whose token type matches; `None` or `all` keeps everything.
pub fn filter_by_type(balances: &[WalletBalance], token_type: Option<&str>) -> Vec<WalletBalance> {
    match token_type.map(str::trim).filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all")) {
        Some(wanted) => balances
            .iter()
            .filter(|b| {
                b.token
                    .token_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(wanted))
            })
            .cloned()
            .collect(),
        None => balances.to_vec(),
    }
}

/// Stable sort, so ties keep upstream order.
pub fn sort_balances(balances: &mut [WalletBalance], field: SortField, direction: SortDirection) {
    balances.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn paginate(balances: &[WalletBalance], page: usize, limit: usize) -> PortfolioPage {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let total = balances.len();
    let pages = total.div_ceil(limit).max(1);
    let page = page.clamp(1, pages);

    let items = balances
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();

    PortfolioPage {
        items,
        pagination: PaginationMetadata {
            total,
            page,
            limit,
            pages,
        },
    }
}

pub fn apply(balances: &[WalletBalance], query: &PortfolioQuery) -> PortfolioPage {
    let mut selected = filter_by_type(balances, query.token_type.as_deref());
    sort_balances(
        &mut selected,
        query.sort.unwrap_or_default(),
        query.direction.unwrap_or_default(),
    );
    paginate(
        &selected,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )
}

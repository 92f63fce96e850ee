use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::portfolio::{PortfolioTotals, WalletBalance};

/// Millisecond wall clock, injectable for tests.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub balances: Vec<WalletBalance>,
    pub totals: PortfolioTotals,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        now_millis - self.timestamp < ttl.as_millis() as i64
    }
}

pub fn cache_key(address: &str, chain_slug: &str) -> String {
    format!("{}:{}", address.to_lowercase(), chain_slug.to_lowercase())
}

/// Short-lived balance cache keyed by `address:chain`.
///
/// Concurrent misses for the same key are not coalesced: both callers go
/// upstream and whichever `put` lands last wins.
#[derive(Clone)]
pub struct BalanceCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl BalanceCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
            ttl,
        }
    }

    pub async fn get(&self, address: &str, chain_slug: &str) -> Option<CacheEntry> {
        let key = cache_key(address, chain_slug);
        let entries = self.entries.read().await;

        entries
            .get(&key)
            .filter(|entry| entry.is_fresh(self.clock.now_millis(), self.ttl))
            .cloned()
    }

    pub async fn put(
        &self,
        address: &str,
        chain_slug: &str,
        balances: Vec<WalletBalance>,
        totals: PortfolioTotals,
    ) {
        let key = cache_key(address, chain_slug);
        let entry = CacheEntry {
            key: key.clone(),
            balances,
            totals,
            timestamp: self.clock.now_millis(),
        };
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    /// Drops expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, self.ttl));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

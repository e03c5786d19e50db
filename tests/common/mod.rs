#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use demotrader::{
    AppState,
    config::{LedgerConfig, Settings},
    error::{QuoteError, StoreError},
    models::Account,
    services::{
        account_store::{AccountStore, MemoryAccountStore},
        ledger::Ledger,
        price_source::{PriceSource, Quote},
    },
};

/// Price source backed by a table the test can change between calls.
#[derive(Default)]
pub struct FakePrices {
    prices: Mutex<HashMap<String, Decimal>>,
    unavailable: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl FakePrices {
    pub fn with(prices: &[(&str, Decimal)]) -> Arc<Self> {
        let fake = Self::default();
        for (sym, p) in prices {
            fake.set(sym, *p);
        }
        Arc::new(fake)
    }

    pub fn set(&self, symbol: &str, price: Decimal) {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
    }

    pub fn fail(&self, symbol: &str) {
        self.unavailable.lock().unwrap().push(symbol.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }

        if self.unavailable.lock().unwrap().iter().any(|s| s == symbol) {
            return Err(QuoteError::Unavailable("upstream down".to_string()));
        }

        let price = self.prices.lock().unwrap().get(symbol).copied();
        match price {
            Some(price) => Ok(Quote { symbol: symbol.to_string(), price, as_of: Utc::now() }),
            None => Err(QuoteError::NotFound(symbol.to_string())),
        }
    }
}

/// Wraps a store and reports a version conflict for the first `conflicts`
/// swaps, as if another process had written the account.
pub struct ConflictingStore {
    pub inner: MemoryAccountStore,
    remaining: AtomicUsize,
}

impl ConflictingStore {
    pub fn new(starting_balance: Decimal, conflicts: usize) -> Self {
        Self {
            inner: MemoryAccountStore::new(starting_balance),
            remaining: AtomicUsize::new(conflicts),
        }
    }
}

#[async_trait]
impl AccountStore for ConflictingStore {
    async fn get_or_create(&self, user_key: &str) -> Result<Account, StoreError> {
        self.inner.get_or_create(user_key).await
    }

    async fn get(&self, user_key: &str) -> Result<Option<Account>, StoreError> {
        self.inner.get(user_key).await
    }

    async fn compare_and_swap(
        &self,
        user_key: &str,
        expected_version: i64,
        next: Account,
    ) -> Result<Account, StoreError> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left > 0 {
            self.remaining.store(left - 1, Ordering::SeqCst);
            return Err(StoreError::VersionConflict);
        }
        self.inner.compare_and_swap(user_key, expected_version, next).await
    }
}

pub fn test_config() -> LedgerConfig {
    LedgerConfig {
        starting_balance: dec!(100000),
        quote_timeout: Duration::from_millis(500),
        max_order_attempts: 3,
    }
}

pub fn memory_ledger(prices: Arc<FakePrices>) -> Ledger {
    let config = test_config();
    let store = Arc::new(MemoryAccountStore::new(config.starting_balance));
    Ledger::new(store, prices, config)
}

pub const TEST_SECRET: &str = "test-secret";

pub fn test_settings() -> Settings {
    Settings {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        mongodb_db: "demotrader_test".to_string(),
        db_connect_retries: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_cookie_name: "auth".to_string(),
        alpha_vantage_api_key: String::new(),
        alpha_vantage_base_url: String::new(),
        starting_balance: dec!(100000),
        quote_timeout_ms: 500,
        max_order_attempts: 3,
        seed_demo_accounts: false,
    }
}

pub fn test_state(prices: Arc<FakePrices>) -> AppState {
    AppState {
        settings: test_settings(),
        ledger: Arc::new(memory_ledger(prices)),
    }
}

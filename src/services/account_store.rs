//! Persistence contract for accounts plus an in-process implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{error::StoreError, models::Account};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns the account, creating it with the starting balance on first
    /// access. Concurrent first calls for one key create exactly one account.
    async fn get_or_create(&self, user_key: &str) -> Result<Account, StoreError>;

    async fn get(&self, user_key: &str) -> Result<Option<Account>, StoreError>;

    /// Replaces the whole record if its stored version is still
    /// `expected_version`. Returns the stored state with the bumped version.
    async fn compare_and_swap(
        &self,
        user_key: &str,
        expected_version: i64,
        next: Account,
    ) -> Result<Account, StoreError>;
}

pub struct MemoryAccountStore {
    starting_balance: Decimal,
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new(starting_balance: Decimal) -> Self {
        Self {
            starting_balance,
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get_or_create(&self, user_key: &str) -> Result<Account, StoreError> {
        if let Some(acc) = self.accounts.read().await.get(user_key) {
            return Ok(acc.clone());
        }

        let mut guard = self.accounts.write().await;
        let acc = guard
            .entry(user_key.to_string())
            .or_insert_with(|| Account::new(user_key, self.starting_balance));
        Ok(acc.clone())
    }

    async fn get(&self, user_key: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(user_key).cloned())
    }

    async fn compare_and_swap(
        &self,
        user_key: &str,
        expected_version: i64,
        mut next: Account,
    ) -> Result<Account, StoreError> {
        let mut guard = self.accounts.write().await;

        let current_version = guard.get(user_key).map(|a| a.version);
        if current_version != Some(expected_version) {
            return Err(StoreError::VersionConflict);
        }

        next.user_key = user_key.to_string();
        next.version = expected_version + 1;
        next.updated_at = Utc::now();
        guard.insert(user_key.to_string(), next.clone());
        Ok(next)
    }
}

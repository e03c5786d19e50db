//! Runs one order end to end: lock the account, quote, decide, persist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::OwnedMutexGuard;

use crate::{
    config::LedgerConfig,
    error::{LedgerError, StoreError},
    models::{normalize_symbol, Order, Position, Trade},
};

use super::{
    account_store::AccountStore,
    ledger_engine,
    price_source::{quote_within, PriceSource},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOutcome {
    pub trade: Trade,
    // None after a sell that closed the position
    pub position: Option<Position>,
    pub balance: Decimal,
    pub realized_profit_loss: Decimal,
}

/// One async mutex per user key. Entries are dropped from the map once
/// nobody holds or waits on them.
#[derive(Default)]
pub struct AccountLocks {
    inner: Mutex<HashMap<String, LockSlot>>,
}

struct LockSlot {
    mutex: Arc<tokio::sync::Mutex<()>>,
    // holders plus waiters, counted under the map lock
    users: usize,
}

/// Counts one caller against a map entry from before it starts waiting until
/// it either gives up or releases the lock.
struct Registration<'a> {
    locks: &'a AccountLocks,
    key: String,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut map = self.locks.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = map.get_mut(&self.key) {
            slot.users -= 1;
            if slot.users == 0 {
                map.remove(&self.key);
            }
        }
    }
}

pub struct AccountGuard<'a> {
    // declared first so the mutex is released before the entry is unregistered
    _guard: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}

impl AccountLocks {
    pub async fn lock(&self, key: &str) -> AccountGuard<'_> {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            let slot = map.entry(key.to_string()).or_insert_with(|| LockSlot {
                mutex: Arc::default(),
                users: 0,
            });
            slot.users += 1;
            slot.mutex.clone()
        };
        let registration = Registration {
            locks: self,
            key: key.to_string(),
        };

        let guard = mutex.lock_owned().await;
        tracing::debug!("acquired account lock for {key}");

        AccountGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct OrderExecutor {
    store: Arc<dyn AccountStore>,
    prices: Arc<dyn PriceSource>,
    config: LedgerConfig,
    locks: AccountLocks,
}

impl OrderExecutor {
    pub fn new(store: Arc<dyn AccountStore>, prices: Arc<dyn PriceSource>, config: LedgerConfig) -> Self {
        Self {
            store,
            prices,
            config,
            locks: AccountLocks::default(),
        }
    }

    pub fn locks(&self) -> &AccountLocks {
        &self.locks
    }

    /// Executes a market order against the caller's account.
    ///
    /// Orders for the same key are serialized; different keys never wait on
    /// each other. A version conflict from the store (another process wrote
    /// the account) replays the whole decision with a fresh read and quote,
    /// up to `max_order_attempts` times. Submitting the same order twice
    /// executes it twice.
    pub async fn execute(&self, user_key: &str, order: &Order) -> Result<OrderOutcome, LedgerError> {
        if order.quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(order.quantity));
        }
        let symbol = normalize_symbol(&order.symbol).ok_or(LedgerError::InvalidSymbol)?;

        let _guard = self.locks.lock(user_key).await;

        let attempts = self.config.max_order_attempts.max(1);
        for attempt in 1..=attempts {
            let account = self.store.get_or_create(user_key).await?;

            let quote = quote_within(self.prices.as_ref(), &symbol, self.config.quote_timeout)
                .await
                .map_err(|e| {
                    tracing::warn!("quote for {symbol} failed: {e}");
                    LedgerError::from(e)
                })?;

            if quote.price <= Decimal::ZERO {
                tracing::warn!("price source returned {} for {symbol}", quote.price);
                return Err(LedgerError::PriceSourceUnavailable(format!(
                    "non-positive price {} for {symbol}",
                    quote.price
                )));
            }

            let execution = ledger_engine::apply(
                &account,
                order.side,
                &symbol,
                order.quantity,
                quote.price,
                Utc::now(),
            )?;

            match self
                .store
                .compare_and_swap(user_key, account.version, execution.account)
                .await
            {
                Ok(saved) => {
                    tracing::info!(
                        "{} {} {} @ {} for {user_key}, balance {}",
                        order.side,
                        order.quantity,
                        symbol,
                        quote.price,
                        saved.balance
                    );
                    return Ok(OrderOutcome {
                        trade: execution.trade,
                        position: execution.position,
                        balance: saved.balance,
                        realized_profit_loss: execution.realized_profit_loss,
                    });
                }
                Err(StoreError::VersionConflict) => {
                    tracing::warn!("version conflict on {user_key} (attempt {attempt} of {attempts})");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(LedgerError::Busy { attempts })
    }
}

//! The operations a caller (the HTTP layer, a CLI, a test) integrates against.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    config::LedgerConfig,
    error::LedgerError,
    models::{Order, PortfolioReport, Trade},
};

use super::{
    account_store::AccountStore,
    order_executor::{OrderExecutor, OrderOutcome},
    price_source::{quote_within, PriceSource, Quote},
    valuation_service::ValuationService,
};

pub struct Ledger {
    store: Arc<dyn AccountStore>,
    prices: Arc<dyn PriceSource>,
    executor: OrderExecutor,
    valuation: ValuationService,
    config: LedgerConfig,
}

impl Ledger {
    pub fn new(store: Arc<dyn AccountStore>, prices: Arc<dyn PriceSource>, config: LedgerConfig) -> Self {
        Self {
            executor: OrderExecutor::new(store.clone(), prices.clone(), config.clone()),
            valuation: ValuationService::new(store.clone(), prices.clone(), config.quote_timeout),
            store,
            prices,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn executor(&self) -> &OrderExecutor {
        &self.executor
    }

    pub async fn buy(&self, user_key: &str, symbol: &str, quantity: i64) -> Result<OrderOutcome, LedgerError> {
        self.executor.execute(user_key, &Order::buy(symbol, quantity)).await
    }

    pub async fn sell(&self, user_key: &str, symbol: &str, quantity: i64) -> Result<OrderOutcome, LedgerError> {
        self.executor.execute(user_key, &Order::sell(symbol, quantity)).await
    }

    pub async fn get_portfolio(&self, user_key: &str) -> Result<PortfolioReport, LedgerError> {
        self.valuation.valuate(user_key).await
    }

    pub async fn get_balance(&self, user_key: &str) -> Result<Decimal, LedgerError> {
        Ok(self.store.get_or_create(user_key).await?.balance)
    }

    /// Oldest first.
    pub async fn get_trade_history(&self, user_key: &str) -> Result<Vec<Trade>, LedgerError> {
        Ok(self.store.get_or_create(user_key).await?.trades)
    }

    /// Current price for display, bounded by the same timeout as orders.
    pub async fn quote(&self, symbol: &str) -> Result<Quote, LedgerError> {
        let symbol = crate::models::normalize_symbol(symbol).ok_or(LedgerError::InvalidSymbol)?;
        Ok(quote_within(self.prices.as_ref(), &symbol, self.config.quote_timeout).await?)
    }
}

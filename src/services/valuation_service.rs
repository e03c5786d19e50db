use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use rust_decimal::Decimal;

use crate::{
    error::LedgerError,
    models::{PortfolioReport, Position, PositionValuation},
};

use super::{
    account_store::AccountStore,
    price_source::{quote_within, PriceSource},
};

pub struct ValuationService {
    store: Arc<dyn AccountStore>,
    prices: Arc<dyn PriceSource>,
    quote_timeout: Duration,
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Values one position at `price`.
pub fn value_position(position: &Position, price: Decimal) -> PositionValuation {
    let qty = Decimal::from(position.quantity);
    let profit_loss = (price - position.average_cost) * qty;

    PositionValuation {
        symbol: position.symbol.clone(),
        quantity: position.quantity,
        average_cost: position.average_cost,
        current_price: Some(price),
        current_value: Some(price * qty),
        profit_loss: Some(profit_loss),
        profit_loss_percent: Some(percent_of(profit_loss, position.cost_basis())),
        error: None,
    }
}

fn unpriced(position: &Position, error: String) -> PositionValuation {
    PositionValuation {
        symbol: position.symbol.clone(),
        quantity: position.quantity,
        average_cost: position.average_cost,
        current_price: None,
        current_value: None,
        profit_loss: None,
        profit_loss_percent: None,
        error: Some(error),
    }
}

/// Folds per-position valuations into the report totals. Positions without a
/// price are listed but left out of every sum.
pub fn summarize(mut positions: Vec<PositionValuation>, balance: Decimal) -> PortfolioReport {
    positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut holdings_value = Decimal::ZERO;
    let mut cost_basis = Decimal::ZERO;
    let mut partial = false;

    for p in &positions {
        match p.current_value {
            Some(value) => {
                holdings_value += value;
                cost_basis += p.average_cost * Decimal::from(p.quantity);
            }
            None => partial = true,
        }
    }

    let profit_loss = holdings_value - cost_basis;

    PortfolioReport {
        positions,
        holdings_value,
        cost_basis,
        profit_loss,
        profit_loss_percent: percent_of(profit_loss, cost_basis),
        balance,
        total_value: balance + holdings_value,
        partial,
    }
}

impl ValuationService {
    pub fn new(store: Arc<dyn AccountStore>, prices: Arc<dyn PriceSource>, quote_timeout: Duration) -> Self {
        Self {
            store,
            prices,
            quote_timeout,
        }
    }

    /// Prices every open position of the account. The account is read once
    /// up front; quotes run concurrently with no lock held.
    pub async fn valuate(&self, user_key: &str) -> Result<PortfolioReport, LedgerError> {
        let snapshot = self.store.get_or_create(user_key).await?;

        let lookups = snapshot.positions.values().map(|position| async move {
            match quote_within(self.prices.as_ref(), &position.symbol, self.quote_timeout).await {
                Ok(q) => value_position(position, q.price),
                Err(e) => {
                    tracing::warn!("could not price {} for {user_key}: {e}", position.symbol);
                    unpriced(position, e.to_string())
                }
            }
        });

        let valued = join_all(lookups).await;
        Ok(summarize(valued, snapshot.balance))
    }
}

//! Pure buy/sell decision logic.
//!
//! Both functions take an account snapshot and return a new one; the input is
//! never touched, so a rejected order leaves nothing to roll back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    error::LedgerError,
    models::{Account, OrderSide, Position, Trade},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub account: Account,
    // None when a sell closed the position
    pub position: Option<Position>,
    pub trade: Trade,
    // only non-zero for sells: (price - average_cost) * quantity
    pub realized_profit_loss: Decimal,
}

fn check_inputs(quantity: i64, price: Decimal) -> Result<(), LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::InvalidQuantity(quantity));
    }
    if price <= Decimal::ZERO {
        return Err(LedgerError::InvalidPrice(price));
    }
    Ok(())
}

pub fn apply_buy(
    account: &Account,
    symbol: &str,
    quantity: i64,
    price: Decimal,
    at: DateTime<Utc>,
) -> Result<Execution, LedgerError> {
    check_inputs(quantity, price)?;

    let qty = Decimal::from(quantity);
    let cost = price * qty;

    if cost > account.balance {
        return Err(LedgerError::InsufficientFunds {
            required: cost,
            available: account.balance,
        });
    }

    let position = match account.position(symbol) {
        Some(p) => {
            let new_qty = p.quantity + quantity;
            let new_avg = (p.cost_basis() + cost) / Decimal::from(new_qty);
            Position {
                symbol: symbol.to_string(),
                quantity: new_qty,
                average_cost: new_avg,
            }
        }
        None => Position {
            symbol: symbol.to_string(),
            quantity,
            average_cost: price,
        },
    };

    let trade = Trade {
        side: OrderSide::Buy,
        symbol: symbol.to_string(),
        quantity,
        price,
        total: cost,
        timestamp: at,
    };

    let mut next = account.clone();
    next.balance -= cost;
    next.positions.insert(symbol.to_string(), position.clone());
    next.trades.push(trade.clone());
    next.updated_at = at;

    Ok(Execution {
        account: next,
        position: Some(position),
        trade,
        realized_profit_loss: Decimal::ZERO,
    })
}

pub fn apply_sell(
    account: &Account,
    symbol: &str,
    quantity: i64,
    price: Decimal,
    at: DateTime<Utc>,
) -> Result<Execution, LedgerError> {
    check_inputs(quantity, price)?;

    let Some(held) = account.position(symbol) else {
        return Err(LedgerError::NoPosition(symbol.to_string()));
    };

    if held.quantity < quantity {
        return Err(LedgerError::InsufficientShares {
            symbol: symbol.to_string(),
            requested: quantity,
            available: held.quantity,
        });
    }

    let qty = Decimal::from(quantity);
    let proceeds = price * qty;
    let realized = (price - held.average_cost) * qty;

    let remaining = held.quantity - quantity;
    let position = (remaining > 0).then(|| Position {
        symbol: symbol.to_string(),
        quantity: remaining,
        average_cost: held.average_cost,
    });

    let trade = Trade {
        side: OrderSide::Sell,
        symbol: symbol.to_string(),
        quantity,
        price,
        total: proceeds,
        timestamp: at,
    };

    let mut next = account.clone();
    next.balance += proceeds;
    match &position {
        Some(p) => {
            next.positions.insert(symbol.to_string(), p.clone());
        }
        None => {
            next.positions.remove(symbol);
        }
    }
    next.trades.push(trade.clone());
    next.updated_at = at;

    Ok(Execution {
        account: next,
        position,
        trade,
        realized_profit_loss: realized,
    })
}

/// Dispatch on the order side.
pub fn apply(
    account: &Account,
    side: OrderSide,
    symbol: &str,
    quantity: i64,
    price: Decimal,
    at: DateTime<Utc>,
) -> Result<Execution, LedgerError> {
    match side {
        OrderSide::Buy => apply_buy(account, symbol, quantity, price, at),
        OrderSide::Sell => apply_sell(account, symbol, quantity, price, at),
    }
}

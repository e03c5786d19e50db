use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    error::StoreError,
    models::{Account, OrderSide, Position, Trade},
};

use super::account_store::AccountStore;

struct Holding {
    symbol: &'static str,
    quantity: i64,
    price: Decimal,
    bought_at: DateTime<Utc>,
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 19, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn demo_accounts() -> Vec<(&'static str, Decimal, Vec<Holding>)> {
    vec![
        (
            "demo-user-1",
            dec!(100000),
            vec![
                Holding { symbol: "AAPL", quantity: 10, price: dec!(175.50), bought_at: at(10, 0) },
                Holding { symbol: "GOOGL", quantity: 5, price: dec!(2750.25), bought_at: at(11, 0) },
            ],
        ),
        (
            "demo-user-2",
            dec!(50000),
            vec![
                Holding { symbol: "MSFT", quantity: 15, price: dec!(325.75), bought_at: at(9, 30) },
                Holding { symbol: "TSLA", quantity: 8, price: dec!(750.25), bought_at: at(10, 30) },
            ],
        ),
    ]
}

/// Installs the demo accounts. Accounts that already traded are left alone.
/// Returns how many accounts were written.
pub async fn seed_demo_accounts(store: &dyn AccountStore) -> Result<usize, StoreError> {
    let mut written = 0;

    for (user_key, balance, holdings) in demo_accounts() {
        let current = store.get_or_create(user_key).await?;
        if !current.trades.is_empty() {
            tracing::info!("demo account {user_key} already has trades, skipping");
            continue;
        }

        let mut positions = HashMap::new();
        let mut trades = Vec::new();
        for h in holdings {
            positions.insert(
                h.symbol.to_string(),
                Position { symbol: h.symbol.to_string(), quantity: h.quantity, average_cost: h.price },
            );
            trades.push(Trade {
                side: OrderSide::Buy,
                symbol: h.symbol.to_string(),
                quantity: h.quantity,
                price: h.price,
                total: h.price * Decimal::from(h.quantity),
                timestamp: h.bought_at,
            });
        }

        let seeded = Account {
            balance,
            positions,
            trades,
            ..current.clone()
        };

        store.compare_and_swap(user_key, current.version, seeded).await?;
        tracing::info!("seeded demo account {user_key}");
        written += 1;
    }

    Ok(written)
}

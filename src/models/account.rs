use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Position, Trade};

/// One user's simulated account. Stored as a single document so the balance,
/// positions and trade log always change together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    // user key is the primary key
    #[serde(rename = "_id")]
    pub user_key: String,

    pub balance: Decimal,

    #[serde(default)]
    pub positions: HashMap<String, Position>,

    // append-only, oldest first
    #[serde(default)]
    pub trades: Vec<Trade>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // bumped by the store on every successful compare-and-swap
    #[serde(default)]
    pub version: i64,
}

impl Account {
    pub fn new(user_key: impl Into<String>, starting_balance: Decimal) -> Self {
        let now = Utc::now();
        Self {
            user_key: user_key.into(),
            balance: starting_balance,
            positions: HashMap::new(),
            trades: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }
}

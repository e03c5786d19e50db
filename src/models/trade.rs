use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderSide;

/// Audit record of one completed execution. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    // "BUY" | "SELL"
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    // price * quantity
    pub total: Decimal,
    pub timestamp: DateTime<Utc>,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,

    // always > 0 while the position is in the account
    pub quantity: i64,
    pub average_cost: Decimal,
}

impl Position {
    /// Money currently tied up in the position at its average cost.
    pub fn cost_basis(&self) -> Decimal {
        self.average_cost * Decimal::from(self.quantity)
    }
}

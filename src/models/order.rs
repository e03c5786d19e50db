use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => f.write_str("BUY"),
            OrderSide::Sell => f.write_str("SELL"),
        }
    }
}

/// Market order as submitted by a caller. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: i64,
}

impl Order {
    pub fn buy(symbol: impl Into<String>, quantity: i64) -> Self {
        Self { side: OrderSide::Buy, symbol: symbol.into(), quantity }
    }

    pub fn sell(symbol: impl Into<String>, quantity: i64) -> Self {
        Self { side: OrderSide::Sell, symbol: symbol.into(), quantity }
    }
}

/// Trim and upper-case a symbol. Returns `None` when nothing is left.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let sym = raw.trim().to_uppercase();
    if sym.is_empty() { None } else { Some(sym) }
}

use rust_decimal::Decimal;
use serde::Serialize;

/// Valuation of a single open position at the latest quote.
///
/// When the quote failed, the price-dependent fields are `None` and `error`
/// carries the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionValuation {
    pub symbol: String,
    pub quantity: i64,
    pub average_cost: Decimal,
    pub current_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
    pub profit_loss_percent: Option<Decimal>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub positions: Vec<PositionValuation>,
    // sums below only cover positions that were priced
    pub holdings_value: Decimal,
    pub cost_basis: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
    pub balance: Decimal,
    // balance + holdings_value
    pub total_value: Decimal,
    // true when at least one symbol could not be priced
    pub partial: bool,
}

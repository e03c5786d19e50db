use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::QuoteError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub as_of: DateTime<Utc>,
}

/// Anything that can tell the ledger what a symbol costs right now.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

/// Quote with an upper bound on how long the caller is willing to wait.
/// A timeout is reported the same way as a transport failure.
pub async fn quote_within(
    source: &dyn PriceSource,
    symbol: &str,
    timeout: std::time::Duration,
) -> Result<Quote, QuoteError> {
    match tokio::time::timeout(timeout, source.quote(symbol)).await {
        Ok(res) => res,
        Err(_) => Err(QuoteError::Unavailable(format!(
            "quote for {symbol} timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
